pub const DEFAULT_FILTER: &str = "info,ielts_scoring=debug,tower_http=debug";

/// Configuration for tracing initialization.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
    /// Used when `RUST_LOG` is not set.
    pub default_filter: String,
}

impl TracingConfig {
    pub fn new(environment: impl Into<String>, level: Option<&str>, json_format: bool) -> Self {
        let default_filter = match level {
            Some(level) if !level.trim().is_empty() => {
                format!("{},ielts_scoring={},tower_http=debug", level, level)
            }
            _ => DEFAULT_FILTER.to_string(),
        };
        Self {
            environment: environment.into(),
            json_format,
            default_filter,
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            environment: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            json_format: std::env::var("LOG_FORMAT")
                .map(|v| v.to_lowercase() == "json")
                .unwrap_or(false),
            default_filter: DEFAULT_FILTER.to_string(),
        }
    }
}
