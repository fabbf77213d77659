//! Char-boundary-safe truncation for prompt context and log lines.

/// Returns the first `max` characters of `s` (not bytes, so multi-byte UTF-8
/// never splits). Call sites that want an ellipsis append it themselves.
pub fn snippet(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    s.chars().take(max).collect()
}
