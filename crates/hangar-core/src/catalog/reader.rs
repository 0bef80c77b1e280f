use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use walkdir::WalkDir;

use super::errors::CatalogError;
use super::parse::{PREFIX_LIMIT, parse_log_prefix};
use super::types::SessionSummary;
use crate::config::HangarConfig;
use crate::paths::session_log_dir;

/// Extension of session log files.
pub const LOG_EXTENSION: &str = "jsonl";

/// Lists recorded sessions for projects under one log root.
#[derive(Debug, Clone)]
pub struct SessionCatalog {
    logs_root: PathBuf,
}

impl SessionCatalog {
    pub fn new(logs_root: PathBuf) -> Self {
        Self { logs_root }
    }

    pub fn from_config(config: &HangarConfig) -> Self {
        Self::new(config.sessions.logs_dir())
    }

    pub fn logs_root(&self) -> &Path {
        &self.logs_root
    }

    /// Log directory for `project_path`.
    pub fn log_dir_for(&self, project_path: &Path) -> PathBuf {
        session_log_dir(&self.logs_root, project_path)
    }

    /// Sessions recorded for `project_path`, newest first.
    pub fn list(&self, project_path: &Path) -> Vec<SessionSummary> {
        list_sessions(&self.logs_root, project_path)
    }
}

/// Sessions recorded for `project_path`, newest first.
///
/// A missing log directory is an empty listing. Files that cannot be opened
/// or read are logged and skipped.
pub fn list_sessions(logs_root: &Path, project_path: &Path) -> Vec<SessionSummary> {
    let dir = session_log_dir(logs_root, project_path);
    if !dir.is_dir() {
        tracing::debug!(event = "core.catalog.log_dir_missing", dir = %dir.display());
        return Vec::new();
    }

    let mut sessions = Vec::new();
    let mut skipped = 0usize;

    for entry in WalkDir::new(&dir).min_depth(1).max_depth(1) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(event = "core.catalog.entry_failed", error = %e);
                skipped += 1;
                continue;
            }
        };

        // A directory named `x.jsonl` is not a log.
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().and_then(|ext| ext.to_str()) != Some(LOG_EXTENSION) {
            continue;
        }

        match summarize_log(entry.path()) {
            Ok(summary) => sessions.push(summary),
            Err(e) => {
                tracing::warn!(event = "core.catalog.log_skipped", error = %e);
                skipped += 1;
            }
        }
    }

    sessions.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));

    tracing::debug!(
        event = "core.catalog.listed",
        dir = %dir.display(),
        count = sessions.len(),
        skipped = skipped
    );

    sessions
}

fn summarize_log(path: &Path) -> Result<SessionSummary, CatalogError> {
    let id = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    let (last_modified, file_size) = match std::fs::metadata(path) {
        Ok(metadata) => (
            metadata
                .modified()
                .map(DateTime::<Utc>::from)
                .unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
            metadata.len(),
        ),
        Err(e) => {
            tracing::debug!(
                event = "core.catalog.stat_failed",
                path = %path.display(),
                error = %e
            );
            (DateTime::<Utc>::UNIX_EPOCH, 0)
        }
    };

    let file = File::open(path).map_err(|source| CatalogError::OpenFailed {
        path: path.display().to_string(),
        source,
    })?;

    // One byte past the limit tells us whether the prefix is the whole file.
    let mut buf = Vec::with_capacity(PREFIX_LIMIT.min(file_size as usize) + 1);
    file.take(PREFIX_LIMIT as u64 + 1)
        .read_to_end(&mut buf)
        .map_err(|source| CatalogError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;
    let truncated = buf.len() > PREFIX_LIMIT;
    buf.truncate(PREFIX_LIMIT);

    let parsed = parse_log_prefix(&buf, truncated);

    Ok(SessionSummary {
        id,
        file_path: path.to_path_buf(),
        last_modified,
        message_count: parsed.message_count,
        message_count_is_exact: !truncated,
        first_user_message: parsed.first_user_message,
        file_size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    struct LogFixture {
        _dir: TempDir,
        logs_root: PathBuf,
        project: PathBuf,
    }

    impl LogFixture {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let logs_root = dir.path().join("projects");
            let project = PathBuf::from("/Users/test/code/app");
            std::fs::create_dir_all(session_log_dir(&logs_root, &project)).unwrap();
            Self {
                _dir: dir,
                logs_root,
                project,
            }
        }

        fn write_log(&self, name: &str, content: &[u8]) -> PathBuf {
            let path = session_log_dir(&self.logs_root, &self.project).join(name);
            std::fs::write(&path, content).unwrap();
            path
        }

        fn set_mtime(path: &Path, secs_ago: u64) {
            let file = File::options().write(true).open(path).unwrap();
            file.set_modified(SystemTime::now() - Duration::from_secs(secs_ago))
                .unwrap();
        }

        fn list(&self) -> Vec<SessionSummary> {
            list_sessions(&self.logs_root, &self.project)
        }
    }

    #[test]
    fn test_missing_log_dir_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(list_sessions(dir.path(), Path::new("/nowhere/at/all")).is_empty());
    }

    #[test]
    fn test_small_file_has_exact_message_count() {
        let fixture = LogFixture::new();
        fixture.write_log(
            "abc-123.jsonl",
            b"{\"type\":\"user\",\"message\":{\"content\":\"hello\"}}\n\n{\"type\":\"assistant\"}\n{\"type\":\"user\",\"content\":\"again\"}\n",
        );

        let sessions = fixture.list();
        assert_eq!(sessions.len(), 1);
        let s = &sessions[0];
        assert_eq!(s.id, "abc-123");
        assert_eq!(s.message_count, 3);
        assert!(s.message_count_is_exact);
        assert_eq!(s.first_user_message.as_deref(), Some("hello"));
        assert!(s.file_size > 0);
    }

    #[test]
    fn test_large_file_count_is_lower_bound() {
        let fixture = LogFixture::new();
        let line = b"{\"type\":\"assistant\",\"content\":\"xxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx\"}\n";
        let total_lines = (PREFIX_LIMIT / line.len()) * 2;
        let content: Vec<u8> = line.repeat(total_lines);
        fixture.write_log("big.jsonl", &content);

        let sessions = fixture.list();
        let s = &sessions[0];
        assert!(!s.message_count_is_exact);
        assert!(s.message_count < total_lines);
        assert!(s.message_count > 0);
        assert_eq!(s.file_size, content.len() as u64);
    }

    #[test]
    fn test_ignores_other_extensions_and_directories() {
        let fixture = LogFixture::new();
        fixture.write_log("notes.txt", b"hello\n");
        let log_dir = session_log_dir(&fixture.logs_root, &fixture.project);
        std::fs::create_dir_all(log_dir.join("dir.jsonl")).unwrap();
        fixture.write_log("real.jsonl", b"{}\n");

        let sessions = fixture.list();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].id, "real");
    }

    #[test]
    fn test_undecodable_file_still_listed() {
        let fixture = LogFixture::new();
        fixture.write_log("binary.jsonl", b"\xff\xfe\xfd\n\xff\n");

        let sessions = fixture.list();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].message_count, 0);
        assert!(sessions[0].first_user_message.is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_log_is_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let fixture = LogFixture::new();
        fixture.write_log("a.jsonl", b"{}\n");
        let locked = fixture.write_log("b.jsonl", b"{}\n");
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();

        // Root ignores file modes, so there is nothing to skip.
        if File::open(&locked).is_ok() {
            return;
        }

        let ids: Vec<_> = fixture.list().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["a"]);

        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o644)).unwrap();
    }

    #[test]
    fn test_sorted_newest_first() {
        let fixture = LogFixture::new();
        let old = fixture.write_log("old.jsonl", b"{}\n");
        let new = fixture.write_log("new.jsonl", b"{}\n");
        let mid = fixture.write_log("mid.jsonl", b"{}\n");
        LogFixture::set_mtime(&old, 3_000);
        LogFixture::set_mtime(&mid, 2_000);
        LogFixture::set_mtime(&new, 1_000);

        let ids: Vec<_> = fixture.list().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_catalog_uses_encoded_directory() {
        let fixture = LogFixture::new();
        fixture.write_log("s.jsonl", b"{}\n");
        let catalog = SessionCatalog::new(fixture.logs_root.clone());

        assert!(catalog.log_dir_for(&fixture.project).ends_with("-Users-test-code-app"));
        assert_eq!(catalog.list(&fixture.project).len(), 1);
    }
}
