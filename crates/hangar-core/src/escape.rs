//! Shared string escaping utilities.

/// Quote a single argument for a POSIX shell command line.
///
/// Plain words made of safe characters pass through unchanged; anything
/// else is wrapped in single quotes with embedded quotes escaped.
pub fn shell_quote(s: &str) -> String {
    let safe = !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | ':' | '='));
    if safe {
        s.to_string()
    } else {
        format!("'{}'", s.replace('\'', r"'\''"))
    }
}
