//! Content parsing for a session log prefix.

use serde_json::Value;

/// Maximum number of bytes read from each log file.
pub const PREFIX_LIMIT: usize = 64 * 1024;

/// What the parser extracted from a log prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedLog {
    pub message_count: usize,
    pub first_user_message: Option<String>,
}

/// Parse the bytes read from the start of a log file.
///
/// `truncated` says whether the file continued past these bytes. A truncated
/// prefix may end inside a multi-byte character; that incomplete tail is
/// dropped. Any other invalid UTF-8 yields an empty result.
pub fn parse_log_prefix(bytes: &[u8], truncated: bool) -> ParsedLog {
    let text = match std::str::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) if truncated && e.error_len().is_none() => {
            // Only the final character was cut off by the prefix limit.
            match std::str::from_utf8(&bytes[..e.valid_up_to()]) {
                Ok(text) => text,
                Err(_) => return ParsedLog::default(),
            }
        }
        Err(e) => {
            tracing::debug!(event = "core.catalog.decode_failed", error = %e);
            return ParsedLog::default();
        }
    };

    let mut parsed = ParsedLog::default();
    for line in text.split('\n') {
        if line.strip_suffix('\r').unwrap_or(line).is_empty() {
            continue;
        }
        parsed.message_count += 1;
        if parsed.first_user_message.is_none() {
            parsed.first_user_message = user_message_text(line);
        }
    }
    parsed
}

/// Text of a `"type": "user"` line, normalized for display.
///
/// Prefers `message.content` and falls back to a top-level `content`.
fn user_message_text(line: &str) -> Option<String> {
    let value: Value = serde_json::from_str(line).ok()?;
    let object = value.as_object()?;
    if object.get("type").and_then(Value::as_str) != Some("user") {
        return None;
    }

    let raw = object
        .get("message")
        .and_then(|m| m.get("content"))
        .and_then(content_text)
        .or_else(|| object.get("content").and_then(Value::as_str))?;

    let normalized = normalize_message(raw);
    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}

/// A content field is either a plain string or a list of typed blocks; the
/// first `text` block is used for the latter.
fn content_text(content: &Value) -> Option<&str> {
    match content {
        Value::String(s) => Some(s.as_str()),
        Value::Array(blocks) => blocks.iter().find_map(|block| {
            if block.get("type").and_then(Value::as_str) == Some("text") {
                block.get("text").and_then(Value::as_str)
            } else {
                None
            }
        }),
        _ => None,
    }
}

/// Trim, turn newlines into spaces and collapse double spaces in one pass.
pub fn normalize_message(raw: &str) -> String {
    raw.trim().replace('\n', " ").replace("  ", " ")
}
