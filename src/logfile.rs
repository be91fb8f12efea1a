use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::event::LogEvent;

/// Append-only mirror of the event stream on disk.
///
/// Problems are reported through `tracing` once; after that the file is
/// dropped and events are only shown on screen.
pub struct LogFile {
    file: Option<File>,
}

impl LogFile {
    pub fn open(path: Option<&Path>) -> Self {
        let file = path.and_then(|path| {
            let opened = path
                .parent()
                .map_or(Ok(()), fs::create_dir_all)
                .and_then(|()| OpenOptions::new().create(true).append(true).open(path));
            match opened {
                Ok(file) => Some(file),
                Err(e) => {
                    tracing::warn!("cannot open log file {}: {e}", path.display());
                    None
                }
            }
        });
        Self { file }
    }

    /// A sink that writes nothing.
    pub fn disabled() -> Self {
        Self { file: None }
    }

    pub fn append(&mut self, event: &LogEvent) {
        let Some(file) = self.file.as_mut() else {
            return;
        };
        if let Err(e) = writeln!(file, "{event}") {
            tracing::warn!("log file write failed, disabling: {e}");
            self.file = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    use crate::event::LogLevel;

    #[test]
    fn appends_formatted_lines_and_creates_parent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logs").join("run.log");

        let mut log = LogFile::open(Some(path.as_path()));
        log.append(&LogEvent::new(LogLevel::Info, "processing: a.pdf"));
        log.append(&LogEvent::new(LogLevel::Error, "a.pdf incorrect password"));
        drop(log);

        let mut log = LogFile::open(Some(path.as_path()));
        log.append(&LogEvent::new(LogLevel::Info, "processing complete"));
        drop(log);

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("[INFO] processing: a.pdf"));
        assert!(lines[1].ends_with("[ERROR] a.pdf incorrect password"));
        assert!(lines[2].ends_with("[INFO] processing complete"));
    }

    #[test]
    fn unopenable_path_degrades_to_disabled() {
        let dir = TempDir::new().unwrap();
        // A directory cannot be opened for appending.
        let mut log = LogFile::open(Some(dir.path()));
        log.append(&LogEvent::new(LogLevel::Info, "ignored"));
        assert!(log.file.is_none());
    }

    #[test]
    fn disabled_writes_nothing() {
        let mut log = LogFile::disabled();
        log.append(&LogEvent::new(LogLevel::Info, "ignored"));
        assert!(log.file.is_none());
    }
}
