use std::fmt;

/// Application runtime environment, selected by `APP_ENVIRONMENT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Test,
    Prod,
}

impl Environment {
    pub const VAR: &'static str = "APP_ENVIRONMENT";

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Test => "test",
            Environment::Prod => "prod",
        }
    }

    /// Reads `APP_ENVIRONMENT`, defaulting to local when unset.
    pub fn from_env() -> Result<Self, String> {
        match std::env::var(Self::VAR) {
            Ok(value) => Self::try_from(value),
            Err(_) => Ok(Self::Local),
        }
    }

    /// Optional settings file layered over the defaults, e.g. `appsettings.prod`.
    pub fn settings_file(&self) -> String {
        format!("appsettings.{}", self.as_str())
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.trim().to_lowercase().as_str() {
            "local" | "dev" | "development" => Ok(Self::Local),
            "test" => Ok(Self::Test),
            "prod" | "production" => Ok(Self::Prod),
            other => Err(format!(
                "Invalid environment: {}. Expected: local, test, or prod",
                other
            )),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
