//! Rolling File Logger
//!
//! Installs a `tracing` subscriber that writes to a small circular set of
//! size-limited log files and keeps the most recent lines in memory.
//! Records emitted through the `log` facade are bridged into `tracing`.

use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use tracing_subscriber::fmt::MakeWriter;

/// Rotate once the active file grows past this many bytes
pub const DEFAULT_MAX_FILE_BYTES: u64 = 1024 * 1024;
/// Number of rotated files kept next to the active one
pub const DEFAULT_MAX_FILES: usize = 3;
/// Lines kept in the in-memory buffer
pub const DEFAULT_BUFFER_LINES: usize = 500;

static RECENT: OnceLock<Arc<Mutex<VecDeque<String>>>> = OnceLock::new();

/// Rotation limits
#[derive(Debug, Clone, Copy)]
pub struct RollingOptions {
    pub max_file_bytes: u64,
    pub max_files: usize,
    pub buffer_lines: usize,
}

impl Default for RollingOptions {
    fn default() -> Self {
        Self {
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            max_files: DEFAULT_MAX_FILES,
            buffer_lines: DEFAULT_BUFFER_LINES,
        }
    }
}

struct RollingState {
    dir: PathBuf,
    app_name: String,
    options: RollingOptions,
    file: File,
    written: u64,
    recent: Arc<Mutex<VecDeque<String>>>,
}

impl RollingState {
    fn active_path(dir: &Path, app_name: &str) -> PathBuf {
        dir.join(format!("{}.log", app_name))
    }

    fn rotated_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("{}.log.{}", self.app_name, index))
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        // Oldest file falls off the end of the ring
        let oldest = self.rotated_path(self.options.max_files);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (1..self.options.max_files).rev() {
            let from = self.rotated_path(index);
            if from.exists() {
                fs::rename(&from, self.rotated_path(index + 1))?;
            }
        }

        let active = Self::active_path(&self.dir, &self.app_name);
        if self.options.max_files > 0 {
            fs::rename(&active, self.rotated_path(1))?;
        }
        self.file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&active)?;
        self.written = 0;
        Ok(())
    }

    fn remember(&self, buf: &[u8]) {
        let Ok(mut recent) = self.recent.lock() else {
            return;
        };
        for line in String::from_utf8_lossy(buf).lines() {
            if line.is_empty() {
                continue;
            }
            while !recent.is_empty() && recent.len() >= self.options.buffer_lines {
                recent.pop_front();
            }
            recent.push_back(line.to_string());
        }
    }
}

/// `MakeWriter` handing out handles to the shared rolling file
#[derive(Clone)]
pub struct RollingWriter {
    state: Arc<Mutex<RollingState>>,
}

impl RollingWriter {
    /// Open (or append to) `<dir>/<app_name>.log`
    pub fn open(dir: &Path, app_name: &str, options: RollingOptions) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let active = RollingState::active_path(dir, app_name);
        let file = OpenOptions::new().create(true).append(true).open(&active)?;
        let written = file.metadata().map(|m| m.len()).unwrap_or(0);
        let recent = Arc::new(Mutex::new(VecDeque::with_capacity(options.buffer_lines)));

        Ok(Self {
            state: Arc::new(Mutex::new(RollingState {
                dir: dir.to_path_buf(),
                app_name: app_name.to_string(),
                options,
                file,
                written,
                recent,
            })),
        })
    }

    fn buffer(&self) -> Option<Arc<Mutex<VecDeque<String>>>> {
        self.state.lock().ok().map(|state| state.recent.clone())
    }

    /// Lines written through this writer, oldest first
    pub fn recent_lines(&self) -> Vec<String> {
        self.buffer()
            .and_then(|recent| recent.lock().ok().map(|r| r.iter().cloned().collect()))
            .unwrap_or_default()
    }
}

/// Single write handle produced by [`RollingWriter`]
pub struct RollingHandle {
    state: Arc<Mutex<RollingState>>,
}

impl Write for RollingHandle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "logger state poisoned"))?;

        if state.written > 0 && state.written + buf.len() as u64 > state.options.max_file_bytes {
            state.rotate()?;
        }

        state.file.write_all(buf)?;
        state.written += buf.len() as u64;
        state.remember(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "logger state poisoned"))?;
        state.file.flush()
    }
}

impl<'a> MakeWriter<'a> for RollingWriter {
    type Writer = RollingHandle;

    fn make_writer(&'a self) -> Self::Writer {
        RollingHandle {
            state: self.state.clone(),
        }
    }
}

/// Initialize the global logger with default rotation limits
pub fn init_logger(log_dir: PathBuf, app_name: &str) -> Result<(), String> {
    init_logger_with(log_dir, app_name, RollingOptions::default())
}

/// Initialize the global logger
///
/// Fails if a global subscriber is already installed.
pub fn init_logger_with(log_dir: PathBuf, app_name: &str, options: RollingOptions) -> Result<(), String> {
    let writer = RollingWriter::open(&log_dir, app_name, options)
        .map_err(|e| format!("Failed to open log file in {}: {}", log_dir.display(), e))?;
    if let Some(buffer) = writer.buffer() {
        let _ = RECENT.set(buffer);
    }

    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| format!("Failed to install logger: {}", e))?;

    tracing::info!(
        "[{}] {} logger started",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
        app_name
    );
    Ok(())
}

/// Log an info line
pub fn info(msg: &str) -> Result<(), String> {
    log::info!("{}", msg);
    Ok(())
}

/// Log an error line
pub fn error(msg: &str) -> Result<(), String> {
    log::error!("{}", msg);
    Ok(())
}

/// Most recent lines of the global logger, oldest first
pub fn recent_lines() -> Vec<String> {
    RECENT
        .get()
        .and_then(|recent| recent.lock().ok().map(|r| r.iter().cloned().collect()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_keeps_bounded_file_set() {
        let dir = tempfile::tempdir().unwrap();
        let options = RollingOptions {
            max_file_bytes: 64,
            max_files: 2,
            buffer_lines: 4,
        };
        let writer = RollingWriter::open(dir.path(), "Test", options).unwrap();

        for i in 0..20 {
            let mut handle = writer.make_writer();
            writeln!(handle, "line number {:02} with some padding", i).unwrap();
        }

        assert!(dir.path().join("Test.log").exists());
        assert!(dir.path().join("Test.log.1").exists());
        assert!(dir.path().join("Test.log.2").exists());
        assert!(!dir.path().join("Test.log.3").exists());

        let active = fs::read_to_string(dir.path().join("Test.log")).unwrap();
        assert!(active.contains("line number 19"));
    }

    #[test]
    fn test_recent_lines_are_bounded() {
        let dir = tempfile::tempdir().unwrap();
        let options = RollingOptions {
            max_file_bytes: 1024,
            max_files: 1,
            buffer_lines: 3,
        };
        let writer = RollingWriter::open(dir.path(), "Buffer", options).unwrap();
        for i in 0..5 {
            let mut handle = writer.make_writer();
            writeln!(handle, "buffered {}", i).unwrap();
        }

        let lines = writer.recent_lines();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines.last().map(String::as_str), Some("buffered 4"));
    }

    #[test]
    fn test_global_logger_keeps_recent_lines() {
        let dir = tempfile::tempdir().unwrap();
        init_logger_with(dir.path().to_path_buf(), "Global", RollingOptions::default()).unwrap();

        info("database ready").unwrap();
        error("database locked").unwrap();

        let lines = recent_lines();
        assert!(lines.iter().any(|l| l.contains("database ready") && l.contains("INFO")));
        assert!(lines.iter().any(|l| l.contains("database locked") && l.contains("ERROR")));

        let active = fs::read_to_string(dir.path().join("Global.log")).unwrap();
        assert!(active.contains("database locked"));
    }
}
