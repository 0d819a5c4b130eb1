//! Rolling Logger
//!
//! File logger with size-based rotation and a circular buffer of recent lines.
//!
//! `init_logger` installs a `tracing` fmt subscriber writing into a rolling
//! file set (`{app}.log`, `{app}.1.log`, ...). Records emitted through the
//! `log` facade are bridged into the same subscriber.

use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

/// Rotation and buffering limits
#[derive(Debug, Clone, Copy)]
pub struct LoggerConfig {
    /// Rotate once the current file would grow past this size
    pub max_file_bytes: u64,
    /// Number of archived files kept next to the current one
    pub max_files: usize,
    /// Lines kept in the in-memory circular buffer
    pub buffer_lines: usize,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: 1024 * 1024,
            max_files: 5,
            buffer_lines: 500,
        }
    }
}

struct Inner {
    dir: PathBuf,
    name: String,
    config: LoggerConfig,
    file: File,
    written: u64,
    recent: VecDeque<String>,
    partial: String,
}

fn current_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.log", name))
}

fn archive_path(dir: &Path, name: &str, index: usize) -> PathBuf {
    dir.join(format!("{}.{}.log", name, index))
}

impl Inner {
    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;
        let current = current_path(&self.dir, &self.name);

        if self.config.max_files > 0 {
            let oldest = archive_path(&self.dir, &self.name, self.config.max_files);
            if oldest.exists() {
                fs::remove_file(&oldest)?;
            }
            for index in (1..self.config.max_files).rev() {
                let from = archive_path(&self.dir, &self.name, index);
                if from.exists() {
                    fs::rename(&from, archive_path(&self.dir, &self.name, index + 1))?;
                }
            }
            fs::rename(&current, archive_path(&self.dir, &self.name, 1))?;
        }

        self.file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&current)?;
        self.written = 0;
        Ok(())
    }

    fn remember(&mut self, buf: &[u8]) {
        if self.config.buffer_lines == 0 {
            return;
        }
        self.partial.push_str(&String::from_utf8_lossy(buf));
        while let Some(pos) = self.partial.find('\n') {
            let line: String = self.partial.drain(..=pos).collect();
            if self.recent.len() == self.config.buffer_lines {
                self.recent.pop_front();
            }
            self.recent.push_back(line.trim_end_matches(['\n', '\r']).to_string());
        }
    }
}

/// Cloneable handle to a rotating log file
#[derive(Clone)]
pub struct RollingFile {
    inner: Arc<Mutex<Inner>>,
}

impl RollingFile {
    /// Open (or continue) `{dir}/{name}.log`
    pub fn open(dir: &Path, name: &str, config: LoggerConfig) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(current_path(dir, name))?;
        let written = file.metadata()?.len();

        Ok(Self {
            inner: Arc::new(Mutex::new(Inner {
                dir: dir.to_path_buf(),
                name: name.to_string(),
                config,
                file,
                written,
                recent: VecDeque::with_capacity(config.buffer_lines),
                partial: String::new(),
            })),
        })
    }

    /// Last complete lines written, oldest first
    pub fn recent_lines(&self) -> Vec<String> {
        match self.inner.lock() {
            Ok(inner) => inner.recent.iter().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn path(&self) -> Option<PathBuf> {
        self.inner
            .lock()
            .ok()
            .map(|inner| current_path(&inner.dir, &inner.name))
    }
}

impl Write for RollingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log file lock poisoned"))?;

        if inner.written > 0 && inner.written + buf.len() as u64 > inner.config.max_file_bytes {
            inner.rotate()?;
        }
        inner.file.write_all(buf)?;
        inner.written += buf.len() as u64;
        inner.remember(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log file lock poisoned"))?;
        inner.file.flush()
    }
}

static LOGGER: OnceLock<RollingFile> = OnceLock::new();

/// Initialize the global logger with default limits
pub fn init_logger(log_dir: PathBuf, app_name: &str) -> Result<(), String> {
    init_logger_with(log_dir, app_name, LoggerConfig::default())
}

/// Initialize the global logger
///
/// Fails if a global subscriber is already installed.
pub fn init_logger_with(log_dir: PathBuf, app_name: &str, config: LoggerConfig) -> Result<(), String> {
    if LOGGER.get().is_some() {
        return Err("Logger already initialized".to_string());
    }

    let file = RollingFile::open(&log_dir, app_name, config)
        .map_err(|e| format!("Failed to open log file: {}", e))?;
    let writer = file.clone();

    tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_target(true)
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
        .map_err(|e| format!("Failed to install subscriber: {}", e))?;

    let path = current_path(&log_dir, app_name);
    let _ = LOGGER.set(file);

    log::info!(
        target: "rolling_logger",
        "{} logging to {} (started {})",
        app_name,
        path.display(),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f")
    );
    Ok(())
}

fn ensure_init() -> Result<(), String> {
    LOGGER
        .get()
        .map(|_| ())
        .ok_or_else(|| "Logger not initialized".to_string())
}

pub fn debug(msg: &str) -> Result<(), String> {
    ensure_init()?;
    tracing::debug!("{}", msg);
    Ok(())
}

pub fn info(msg: &str) -> Result<(), String> {
    ensure_init()?;
    tracing::info!("{}", msg);
    Ok(())
}

pub fn warn(msg: &str) -> Result<(), String> {
    ensure_init()?;
    tracing::warn!("{}", msg);
    Ok(())
}

pub fn error(msg: &str) -> Result<(), String> {
    ensure_init()?;
    tracing::error!("{}", msg);
    Ok(())
}

/// Lines held by the global circular buffer (empty before init)
pub fn recent_lines() -> Vec<String> {
    LOGGER.get().map(|f| f.recent_lines()).unwrap_or_default()
}

/// Path of the active log file
pub fn log_file_path() -> Option<PathBuf> {
    LOGGER.get().and_then(|f| f.path())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_lines(file: &mut RollingFile, count: usize) {
        for i in 0..count {
            writeln!(file, "line {}", i).unwrap();
        }
        file.flush().unwrap();
    }

    #[test]
    fn test_recent_lines_are_bounded() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoggerConfig {
            max_file_bytes: 1024 * 1024,
            max_files: 2,
            buffer_lines: 3,
        };
        let mut file = RollingFile::open(dir.path(), "app", config).unwrap();
        write_lines(&mut file, 10);

        assert_eq!(file.recent_lines(), vec!["line 7", "line 8", "line 9"]);
    }

    #[test]
    fn test_partial_lines_wait_for_newline() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = RollingFile::open(dir.path(), "app", LoggerConfig::default()).unwrap();

        file.write_all(b"hello ").unwrap();
        assert!(file.recent_lines().is_empty());

        file.write_all(b"world\n").unwrap();
        assert_eq!(file.recent_lines(), vec!["hello world"]);
    }

    #[test]
    fn test_rotation_caps_archives() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoggerConfig {
            max_file_bytes: 32,
            max_files: 2,
            buffer_lines: 10,
        };
        let mut file = RollingFile::open(dir.path(), "app", config).unwrap();
        write_lines(&mut file, 10);

        assert!(dir.path().join("app.log").exists());
        assert!(dir.path().join("app.1.log").exists());
        assert!(dir.path().join("app.2.log").exists());
        assert!(!dir.path().join("app.3.log").exists());

        let current = fs::read_to_string(dir.path().join("app.log")).unwrap();
        assert!(current.ends_with("line 9\n"));
        assert!(current.len() as u64 <= 32);
    }

    #[test]
    fn test_reopen_appends() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut file = RollingFile::open(dir.path(), "app", LoggerConfig::default()).unwrap();
            write_lines(&mut file, 2);
        }
        let mut file = RollingFile::open(dir.path(), "app", LoggerConfig::default()).unwrap();
        writeln!(file, "again").unwrap();

        let content = fs::read_to_string(dir.path().join("app.log")).unwrap();
        assert_eq!(content, "line 0\nline 1\nagain\n");
    }

    #[test]
    fn test_helpers_require_init() {
        if LOGGER.get().is_none() {
            assert!(info("not yet").is_err());
            assert!(recent_lines().is_empty());
        }
    }
}
