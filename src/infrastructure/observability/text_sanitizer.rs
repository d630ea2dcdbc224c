const MAX_VISIBLE_CHARS: usize = 100;

/// Sanitizes submitted essay or transcript text for safe logging.
pub fn sanitize_text(text: &str) -> String {
    let flattened = text.split_whitespace().collect::<Vec<_>>().join(" ");

    if flattened.is_empty() {
        return String::from("[EMPTY]");
    }

    let total = flattened.chars().count();
    let sanitized = if total > MAX_VISIBLE_CHARS {
        let visible: String = flattened.chars().take(MAX_VISIBLE_CHARS).collect();
        format!("{}... ({} chars total)", visible, total)
    } else {
        flattened
    };

    redact_sensitive_patterns(&sanitized)
}

fn redact_sensitive_patterns(text: &str) -> String {
    let patterns = [
        ("Bearer ", "Bearer [REDACTED]"),
        ("api_key=", "api_key=[REDACTED]"),
        ("password=", "password=[REDACTED]"),
        ("secret=", "secret=[REDACTED]"),
        ("token=", "token=[REDACTED]"),
    ];

    let mut result = text.to_string();
    for (pattern, replacement) in patterns {
        if let Some(idx) = result.find(pattern) {
            let value_start = idx + pattern.len();
            let end = result[value_start..]
                .find(|c: char| c.is_whitespace() || c == '&' || c == '"' || c == '\'')
                .map(|i| value_start + i)
                .unwrap_or(result.len());
            result = format!("{}{}{}", &result[..idx], replacement, &result[end..]);
        }
    }

    result
}
