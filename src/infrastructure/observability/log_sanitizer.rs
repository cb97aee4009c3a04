const MAX_VISIBLE_CHARS: usize = 120;

/// Shortens free text coming back from the remote service before it goes into a log line.
pub fn truncate_for_log(text: &str) -> String {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let total = trimmed.chars().count();
    if total <= MAX_VISIBLE_CHARS {
        return trimmed.to_string();
    }

    let visible: String = trimmed.chars().take(MAX_VISIBLE_CHARS).collect();
    format!("{visible}... ({total} chars total)")
}

/// Masks an API key for display, keeping only a short prefix.
pub fn redact_secret(secret: &str) -> String {
    if secret.is_empty() {
        return String::from("[UNSET]");
    }
    let prefix: String = secret.chars().take(4).collect();
    format!("{prefix}[REDACTED]")
}
