//! Logger utility for application-wide logging
//!
//! Console logging goes through `env_logger`. When a log file is configured
//! a custom `Logger` is installed instead, writing every record to the file
//! as well as to the console.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use log::{LevelFilter, Log, Metadata, Record};

/// Logger writing to a file and the console
pub struct Logger {
    /// File handle for log output
    file: Mutex<Option<File>>,
    /// Most verbose level written
    level: LevelFilter,
}

impl Logger {
    /// Creates a new logger instance
    ///
    /// # Arguments
    ///
    /// * `log_file` - Path to the log file (truncated if it exists)
    /// * `level` - Most verbose level to write
    ///
    /// # Returns
    ///
    /// A new Logger instance or an error if the file cannot be created
    pub fn new(log_file: &str, level: LevelFilter) -> io::Result<Self> {
        let file = File::create(Path::new(log_file))?;
        Ok(Logger {
            file: Mutex::new(Some(file)),
            level,
        })
    }

    /// Writes a line to the log file
    pub fn write_line(&self, message: &str) -> io::Result<()> {
        let mut guard = match self.file.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(file) = &mut *guard {
            writeln!(file, "{}", message)?;
            file.flush()?;
        }
        Ok(())
    }

    /// Install the process-wide logger
    ///
    /// # Arguments
    ///
    /// * `log_file` - Optional log file; console-only logging when absent
    /// * `level` - Maximum level; `RUST_LOG` overrides it for console logging
    ///
    /// Calling this again after a logger is installed leaves the first one
    /// in place.
    pub fn init_global_logger(log_file: Option<&str>, level: LevelFilter) -> io::Result<()> {
        match log_file {
            Some(path) => {
                let global_logger = Logger::new(path, level)?;
                if log::set_boxed_logger(Box::new(global_logger)).is_err() {
                    eprintln!("Warning: Global logger was already initialized");
                    return Ok(());
                }
                log::set_max_level(level);
            },
            None => {
                let mut builder = env_logger::Builder::new();
                builder.filter_level(level);
                if let Ok(filters) = std::env::var("RUST_LOG") {
                    builder.parse_filters(&filters);
                }
                if builder.try_init().is_err() {
                    eprintln!("Warning: Global logger was already initialized");
                }
            },
        }
        Ok(())
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let message = format!("[{}] {}", record.level(), record.args());
            let _ = self.write_line(&message);

            // Also print to console
            eprintln!("{}", message);
        }
    }

    fn flush(&self) {
        // Already flushing in write_line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    #[test]
    fn test_file_logger_respects_level() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("warp.log");
        let logger = Logger::new(path.to_str().unwrap(), LevelFilter::Info).unwrap();

        logger.log(&Record::builder()
            .args(format_args!("kept"))
            .level(Level::Warn)
            .build());
        logger.log(&Record::builder()
            .args(format_args!("dropped"))
            .level(Level::Debug)
            .build());

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "[WARN] kept\n");
    }

    #[test]
    fn test_unwritable_log_file() {
        assert!(Logger::new("/nonexistent/dir/warp.log", LevelFilter::Info).is_err());
    }
}
