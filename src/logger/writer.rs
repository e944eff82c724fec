//! Access log writer module
//!
//! Writes formatted access log lines to stdout or an append-mode file.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, OnceLock};

/// Global access log writer instance
static ACCESS_WRITER: OnceLock<AccessLogWriter> = OnceLock::new();

/// Log output target
enum LogTarget {
    Stdout,
    File(Mutex<File>),
}

pub struct AccessLogWriter {
    target: LogTarget,
}

impl AccessLogWriter {
    fn new(access_log_file: Option<&str>) -> io::Result<Self> {
        let target = match access_log_file {
            Some(path) => LogTarget::File(Mutex::new(open_log_file(path)?)),
            None => LogTarget::Stdout,
        };
        Ok(Self { target })
    }

    pub fn write_line(&self, message: &str) {
        match &self.target {
            LogTarget::Stdout => println!("{message}"),
            LogTarget::File(file) => {
                if let Ok(mut f) = file.lock() {
                    let _ = writeln!(f, "{message}");
                }
            }
        }
    }
}

/// Open or create a log file for appending
fn open_log_file(path: &str) -> io::Result<File> {
    // Create parent directories if they don't exist
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    OpenOptions::new().create(true).append(true).open(path)
}

/// Initialize the global access log writer
///
/// This should be called once at application startup.
/// Returns error if the log file cannot be opened.
pub fn init(access_log_file: Option<&str>) -> io::Result<()> {
    let writer = AccessLogWriter::new(access_log_file)?;
    ACCESS_WRITER.set(writer).map_err(|_| {
        io::Error::new(
            io::ErrorKind::AlreadyExists,
            "Access log writer already initialized",
        )
    })
}

/// Get the global writer, if `init()` has run
pub fn get() -> Option<&'static AccessLogWriter> {
    ACCESS_WRITER.get()
}
