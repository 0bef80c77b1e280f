use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

/// Characters of the first user message shown before truncation.
pub const DISPLAY_NAME_MAX_CHARS: usize = 60;

/// Metadata for one recorded session log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    /// File stem of the log, which is the session id.
    pub id: String,
    pub file_path: PathBuf,
    /// Epoch when the file could not be stat'ed.
    pub last_modified: DateTime<Utc>,
    /// Non-empty lines in the parsed prefix.
    pub message_count: usize,
    /// False when the file was larger than the parsed prefix, in which case
    /// `message_count` is a lower bound.
    pub message_count_is_exact: bool,
    /// Normalized text of the first user message, untruncated.
    pub first_user_message: Option<String>,
    pub file_size: u64,
}

impl SessionSummary {
    /// Name for a picker row: the first user message cut to
    /// [`DISPLAY_NAME_MAX_CHARS`] with an ellipsis, or a short id.
    pub fn display_name(&self) -> String {
        match &self.first_user_message {
            Some(text) if text.chars().count() > DISPLAY_NAME_MAX_CHARS => {
                let cut: String = text.chars().take(DISPLAY_NAME_MAX_CHARS).collect();
                format!("{}…", cut.trim_end())
            }
            Some(text) => text.clone(),
            None => {
                let short: String = self.id.chars().take(8).collect();
                format!("Session {short}")
            }
        }
    }

    /// "3 messages" or "120+ messages" when the count is a lower bound.
    pub fn message_count_label(&self) -> String {
        let plus = if self.message_count_is_exact { "" } else { "+" };
        let noun = if self.message_count == 1 && self.message_count_is_exact {
            "message"
        } else {
            "messages"
        };
        format!("{}{} {}", self.message_count, plus, noun)
    }

    /// Coarse age relative to `now`, e.g. "5m ago".
    pub fn relative_time(&self, now: DateTime<Utc>) -> String {
        let secs = (now - self.last_modified).num_seconds().max(0);
        match secs {
            0..60 => "just now".to_string(),
            60..3_600 => format!("{}m ago", secs / 60),
            3_600..86_400 => format!("{}h ago", secs / 3_600),
            _ => format!("{}d ago", secs / 86_400),
        }
    }

    /// Human-readable file size.
    pub fn formatted_size(&self) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        match self.file_size {
            s if s >= MB => format!("{:.1} MB", s as f64 / MB as f64),
            s if s >= KB => format!("{:.1} KB", s as f64 / KB as f64),
            s => format!("{} B", s),
        }
    }
}
