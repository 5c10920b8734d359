//! File-based logging through `tracing`
//!
//! Logs go to `quick-switch.log` next to the executable. The first instance
//! truncates it at start; a second instance only appends its exit line. If
//! the file cannot be opened the subscriber writes to stderr.
//!
//! Formatting happens on the calling thread, but the actual write is handed
//! to a `tracing-appender` worker so the keyboard hook never waits on disk.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::EnvFilter;

/// Log file name, created next to the executable
pub const LOG_FILE_NAME: &str = "quick-switch.log";

/// How the log file is opened
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogMode {
    /// Start an empty log (the instance that owns the process lock)
    Fresh,
    /// Keep what is there (an instance that is about to exit)
    Append,
}

/// Keeps the background writer alive; pending lines are flushed on drop
pub struct LogGuard {
    path: Option<PathBuf>,
    _worker: WorkerGuard,
}

impl LogGuard {
    /// The log file in use, or `None` when logging fell back to stderr
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

/// Get the directory where the executable is located
pub fn exe_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|d| d.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Build the filter: `RUST_LOG` wins over the configured level
fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

fn open_log_file(path: &Path, mode: LogMode) -> io::Result<File> {
    let mut options = OpenOptions::new();
    match mode {
        LogMode::Fresh => options.write(true).create(true).truncate(true),
        LogMode::Append => options.append(true).create(true),
    };
    options.open(path)
}

/// Move writes to `sink` onto a dedicated worker thread
fn background_writer<W: Write + Send + 'static>(sink: W) -> (NonBlocking, WorkerGuard) {
    tracing_appender::non_blocking(sink)
}

fn subscriber(level: &str, writer: NonBlocking) -> impl tracing::Subscriber + Send + Sync {
    tracing_subscriber::fmt()
        .with_env_filter(filter(level))
        .with_ansi(false)
        .with_target(false)
        .with_thread_names(true)
        .with_writer(writer)
        .finish()
}

/// Install the global subscriber
///
/// Hold the returned guard until shutdown. Calling this twice leaves the
/// first subscriber in place.
pub fn init(level: &str, mode: LogMode) -> LogGuard {
    let log_path = exe_dir().join(LOG_FILE_NAME);

    match open_log_file(&log_path, mode) {
        Ok(file) => {
            let (writer, worker) = background_writer(file);
            let _ = tracing::subscriber::set_global_default(subscriber(level, writer));
            if mode == LogMode::Fresh {
                tracing::info!("=== Quick Switch log started ===");
            }
            LogGuard {
                path: Some(log_path),
                _worker: worker,
            }
        }
        Err(e) => {
            let (writer, worker) = background_writer(io::stderr());
            let _ = tracing::subscriber::set_global_default(subscriber(level, writer));
            tracing::warn!("Could not open {}: {}", log_path.display(), e);
            LogGuard {
                path: None,
                _worker: worker,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::thread::{self, ThreadId};

    /// Records which thread performed each write
    struct ThreadRecorder(Arc<Mutex<Vec<ThreadId>>>);

    impl Write for ThreadRecorder {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().push(thread::current().id());
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_exe_dir_exists() {
        assert!(exe_dir().is_dir());
    }

    #[test]
    fn test_bad_level_falls_back() {
        // Must not panic on a directive that does not parse
        let _ = filter("not a [valid directive");
    }

    #[test]
    fn test_logging_thread_never_writes_itself() {
        let writers = Arc::new(Mutex::new(Vec::new()));
        let (writer, worker) = background_writer(ThreadRecorder(Arc::clone(&writers)));

        tracing::subscriber::with_default(subscriber("info", writer), || {
            // error level so a RUST_LOG override cannot filter it out
            tracing::error!(slot = 3, "Failed to switch window");
        });
        // Flushes and joins the worker
        drop(worker);

        let writers = writers.lock().unwrap();
        assert!(!writers.is_empty());
        assert!(writers.iter().all(|id| *id != thread::current().id()));
    }

    #[test]
    fn test_fresh_mode_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LOG_FILE_NAME);
        std::fs::write(&path, "previous run\n").unwrap();

        drop(open_log_file(&path, LogMode::Fresh).unwrap());

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_append_mode_keeps_running_instance_log() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LOG_FILE_NAME);
        std::fs::write(&path, "running instance\n").unwrap();

        let mut file = open_log_file(&path, LogMode::Append).unwrap();
        writeln!(file, "second instance exiting").unwrap();
        drop(file);

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "running instance\nsecond instance exiting\n"
        );
    }
}
