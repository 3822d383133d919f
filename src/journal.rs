use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Append-only record of what happened to the timer during this session.
#[derive(Debug, Clone)]
pub struct Journal {
    path: PathBuf,
}

impl Journal {
    pub fn open(path: impl Into<PathBuf>) -> std::io::Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let journal = Self { path };
        journal.append(&format!(
            "=== Session started at {} ===",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        ))?;
        Ok(journal)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write one timestamped event line. Failures are logged, not returned.
    pub fn record(&self, event: &str) {
        let line = format!("[{}] {}", Local::now().format("%H:%M:%S"), event);
        if let Err(e) = self.append(&line) {
            warn!(path = %self.path.display(), "failed to write journal: {}", e);
        }
    }

    fn append(&self, line: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("timer21-journal-{}-{}", std::process::id(), name))
            .join("session.log")
    }

    #[test]
    fn test_header_then_events() {
        let path = scratch_path("events");
        let journal = Journal::open(&path).unwrap();
        journal.record("Started 5:00");
        journal.record("Stopped");

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("=== Session started at "));
        assert!(lines[1].ends_with("] Started 5:00"));
        assert!(lines[2].starts_with('[') && lines[2].ends_with("] Stopped"));

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_reopen_appends() {
        let path = scratch_path("reopen");
        Journal::open(&path).unwrap().record("first");
        Journal::open(&path).unwrap().record("second");

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.matches("=== Session started at").count(), 2);
        assert!(contents.contains("first") && contents.contains("second"));

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
