use ielts_scoring::infrastructure::observability::sanitize_text;

#[test]
fn given_blank_text_when_sanitizing_then_returns_empty_marker() {
    assert_eq!(sanitize_text("   \n\t "), "[EMPTY]");
}

#[test]
fn given_short_text_when_sanitizing_then_flattens_whitespace() {
    assert_eq!(sanitize_text("  Hello\n\nworld  "), "Hello world");
}

#[test]
fn given_long_multibyte_text_when_sanitizing_then_truncates_on_char_boundary() {
    let text = "Bài viết ".repeat(30);

    let sanitized = sanitize_text(&text);

    assert!(sanitized.contains("chars total"));
    assert!(sanitized.starts_with("Bài viết"));
}

#[test]
fn given_credential_in_text_when_sanitizing_then_redacts_value() {
    let sanitized = sanitize_text("my essay password=hunter2 is great");

    assert!(!sanitized.contains("hunter2"));
    assert!(sanitized.contains("password=[REDACTED]"));
}
