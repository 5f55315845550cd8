//! String utilities for the domain layer.

/// Keep the first `max_chars` characters of `s`, appending `...` when
/// anything was cut.
///
/// Counts characters rather than bytes, so multi-byte text is never split
/// in the middle of a code point.
pub fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        None => s.to_string(),
        Some((end, _)) => format!("{}...", &s[..end]),
    }
}

/// Collapse all whitespace runs (including newlines) into single spaces.
pub fn single_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
