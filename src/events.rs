//! Optional JSONL event log, one timestamped line per crawl milestone.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;
use tracing::warn;

/// A single crawl milestone. Absent fields are omitted from the line.
#[derive(Debug, Clone, Serialize)]
pub struct CrawlEvent {
    pub timestamp: DateTime<Utc>,
    pub event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CrawlEvent {
    fn new(event: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            event: event.to_string(),
            url: None,
            count: None,
            error: None,
        }
    }

    pub fn run_started(url: &str) -> Self {
        Self {
            url: Some(url.to_string()),
            ..Self::new("run_started")
        }
    }

    pub fn rows_found(count: usize) -> Self {
        Self {
            count: Some(count),
            ..Self::new("rows_found")
        }
    }

    pub fn profile_visited(url: &str) -> Self {
        Self {
            url: Some(url.to_string()),
            ..Self::new("profile_visited")
        }
    }

    pub fn profile_failed(url: &str, error: String) -> Self {
        Self {
            url: Some(url.to_string()),
            error: Some(error),
            ..Self::new("profile_failed")
        }
    }

    pub fn outputs_written(count: usize) -> Self {
        Self {
            count: Some(count),
            ..Self::new("outputs_written")
        }
    }
}

/// Append-only event sink. A failed open or write downgrades to a warning;
/// the crawl never stops over its own telemetry.
pub struct EventLog {
    file: Option<File>,
}

impl EventLog {
    /// Open the log at `path`, or return a disabled sink when `path` is None.
    pub fn open(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self { file: None };
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).ok();
            }
        }
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Self { file: Some(file) },
            Err(e) => {
                warn!("could not open event log {}: {e}", path.display());
                Self { file: None }
            }
        }
    }

    pub fn record(&mut self, event: CrawlEvent) {
        let Some(file) = self.file.as_mut() else {
            return;
        };
        match serde_json::to_string(&event) {
            Ok(line) => {
                if let Err(e) = writeln!(file, "{line}") {
                    warn!("could not append crawl event: {e}");
                }
            }
            Err(e) => warn!("could not serialize crawl event: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_jsonl_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");

        let mut log = EventLog::open(Some(path.as_path()));
        log.record(CrawlEvent::run_started("https://example.com/list"));
        log.record(CrawlEvent::rows_found(4));

        let raw = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = raw.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["event"], "run_started");
        assert_eq!(first["url"], "https://example.com/list");
        assert!(first["timestamp"].is_string());
        assert!(first.get("count").is_none());

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["event"], "rows_found");
        assert_eq!(second["count"], 4);
    }

    #[test]
    fn test_disabled_log_is_silent() {
        let mut log = EventLog::open(None);
        log.record(CrawlEvent::outputs_written(0));
    }

    #[test]
    fn test_open_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/logs/events.jsonl");

        let mut log = EventLog::open(Some(path.as_path()));
        log.record(CrawlEvent::rows_found(1));

        assert!(path.exists());
    }
}
