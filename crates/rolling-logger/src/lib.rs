//! Rolling Logger
//!
//! A `tracing` subscriber writing to a size-capped log file. When the file
//! grows past the limit it is moved to `<name>.log.1` and a fresh one is
//! started. The most recent lines are also kept in memory so the app can show
//! them without touching the file.
//!
//! Records emitted through the `log` facade are captured as well.

use std::collections::VecDeque;
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::{DefaultFields, Format, Full, Writer};
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::{MakeWriter, SubscriberBuilder};

/// Logger settings
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Rotate once the current file would exceed this size
    pub max_bytes: u64,
    /// Lines kept in the in-memory buffer
    pub buffer_lines: usize,
    pub level: Level,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            max_bytes: 1024 * 1024,
            buffer_lines: 200,
            level: Level::INFO,
        }
    }
}

#[derive(Debug)]
pub enum LoggerError {
    Io(io::Error),
    AlreadyInitialized,
    NotInitialized,
}

impl fmt::Display for LoggerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoggerError::Io(e) => write!(f, "log file error: {}", e),
            LoggerError::AlreadyInitialized => write!(f, "logger already initialized"),
            LoggerError::NotInitialized => write!(f, "logger not initialized"),
        }
    }
}

impl std::error::Error for LoggerError {}

impl From<io::Error> for LoggerError {
    fn from(err: io::Error) -> Self {
        LoggerError::Io(err)
    }
}

// ========================
// Rolling file
// ========================

struct RollingFile {
    path: PathBuf,
    max_bytes: u64,
    file: File,
    written: u64,
}

impl RollingFile {
    fn open(path: PathBuf, max_bytes: u64) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata()?.len();
        Ok(Self {
            path,
            max_bytes,
            file,
            written,
        })
    }

    fn backup_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".1");
        PathBuf::from(name)
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;
        fs::rename(&self.path, self.backup_path())?;
        self.file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)?;
        self.written = 0;
        Ok(())
    }

    fn write_record(&mut self, record: &[u8]) -> io::Result<()> {
        if self.written > 0 && self.written + record.len() as u64 > self.max_bytes {
            self.rotate()?;
        }
        self.file.write_all(record)?;
        self.written += record.len() as u64;
        Ok(())
    }
}

// ========================
// Shared sink
// ========================

struct Sink {
    file: Mutex<RollingFile>,
    recent: Mutex<VecDeque<String>>,
    capacity: usize,
}

impl Sink {
    fn new(path: PathBuf, config: &LoggerConfig) -> io::Result<Self> {
        Ok(Self {
            file: Mutex::new(RollingFile::open(path, config.max_bytes)?),
            recent: Mutex::new(VecDeque::with_capacity(config.buffer_lines)),
            capacity: config.buffer_lines,
        })
    }

    fn record(&self, bytes: &[u8]) {
        if let Ok(mut file) = self.file.lock() {
            // Nowhere to report a failing log write
            let _ = file.write_record(bytes);
        }
        if self.capacity == 0 {
            return;
        }
        if let Ok(mut recent) = self.recent.lock() {
            for line in String::from_utf8_lossy(bytes).lines() {
                if recent.len() == self.capacity {
                    recent.pop_front();
                }
                recent.push_back(line.to_string());
            }
        }
    }

    fn recent(&self) -> Vec<String> {
        self.recent
            .lock()
            .map(|recent| recent.iter().cloned().collect())
            .unwrap_or_default()
    }
}

/// `MakeWriter` handing out one buffered writer per event
#[derive(Clone)]
struct SinkWriter(Arc<Sink>);

struct EventWriter {
    sink: Arc<Sink>,
    buf: Vec<u8>,
}

impl Write for EventWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for EventWriter {
    fn drop(&mut self) {
        if !self.buf.is_empty() {
            self.sink.record(&self.buf);
        }
    }
}

impl<'a> MakeWriter<'a> for SinkWriter {
    type Writer = EventWriter;

    fn make_writer(&'a self) -> Self::Writer {
        EventWriter {
            sink: Arc::clone(&self.0),
            buf: Vec::new(),
        }
    }
}

struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

type Builder = SubscriberBuilder<DefaultFields, Format<Full, LocalTime>, LevelFilter, SinkWriter>;

fn builder(sink: Arc<Sink>, level: Level) -> Builder {
    tracing_subscriber::fmt()
        .with_writer(SinkWriter(sink))
        .with_ansi(false)
        .with_timer(LocalTime)
        .with_target(true)
        .with_max_level(level)
}

// ========================
// Global logger
// ========================

static SINK: OnceLock<Arc<Sink>> = OnceLock::new();

/// Path of the log file for `app_name` inside `log_dir`
pub fn log_file_path(log_dir: impl AsRef<Path>, app_name: &str) -> PathBuf {
    log_dir.as_ref().join(format!("{}.log", app_name))
}

/// Install the global logger. Returns the path of the active log file.
pub fn init_logger_with(
    log_dir: impl AsRef<Path>,
    app_name: &str,
    config: LoggerConfig,
) -> Result<PathBuf, LoggerError> {
    if SINK.get().is_some() {
        return Err(LoggerError::AlreadyInitialized);
    }
    fs::create_dir_all(log_dir.as_ref())?;
    let path = log_file_path(log_dir, app_name);
    let sink = Arc::new(Sink::new(path.clone(), &config)?);

    // Also installs the `log` -> `tracing` bridge
    builder(Arc::clone(&sink), config.level)
        .try_init()
        .map_err(|_| LoggerError::AlreadyInitialized)?;
    let _ = SINK.set(sink);

    tracing::info!("Logging to {}", path.display());
    Ok(path)
}

/// Most recent log lines, oldest first. Empty before initialization.
pub fn recent_lines() -> Vec<String> {
    SINK.get().map(|sink| sink.recent()).unwrap_or_default()
}

/// Last `lines` lines of a log file, oldest first. A missing file reads as
/// empty.
pub fn tail(path: impl AsRef<Path>, lines: usize) -> Result<Vec<String>, LoggerError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };
    let all: Vec<&str> = content.lines().collect();
    let start = all.len().saturating_sub(lines);
    Ok(all[start..].iter().map(|line| line.to_string()).collect())
}

pub fn info(message: &str) -> Result<(), LoggerError> {
    if SINK.get().is_none() {
        return Err(LoggerError::NotInitialized);
    }
    tracing::info!("{}", message);
    Ok(())
}

pub fn error(message: &str) -> Result<(), LoggerError> {
    if SINK.get().is_none() {
        return Err(LoggerError::NotInitialized);
    }
    tracing::error!("{}", message);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sink_in(dir: &Path, max_bytes: u64, buffer_lines: usize) -> Arc<Sink> {
        let config = LoggerConfig {
            max_bytes,
            buffer_lines,
            level: Level::DEBUG,
        };
        Arc::new(Sink::new(log_file_path(dir, "test"), &config).unwrap())
    }

    #[test]
    fn test_rotates_at_size_limit() {
        let dir = tempfile::tempdir().unwrap();
        let sink = sink_in(dir.path(), 20, 10);

        sink.record(b"first line 0123\n");
        sink.record(b"second line 012\n");

        let current = fs::read_to_string(log_file_path(dir.path(), "test")).unwrap();
        let backup = fs::read_to_string(dir.path().join("test.log.1")).unwrap();
        assert_eq!(current, "second line 012\n");
        assert_eq!(backup, "first line 0123\n");
    }

    #[test]
    fn test_appends_to_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = log_file_path(dir.path(), "test");
        fs::write(&path, "old\n").unwrap();

        let sink = sink_in(dir.path(), 1024, 10);
        sink.record(b"new\n");
        assert_eq!(fs::read_to_string(&path).unwrap(), "old\nnew\n");
    }

    #[test]
    fn test_ring_buffer_keeps_newest_lines() {
        let dir = tempfile::tempdir().unwrap();
        let sink = sink_in(dir.path(), 1024, 3);
        for i in 0..5 {
            sink.record(format!("line {}\n", i).as_bytes());
        }
        assert_eq!(sink.recent(), vec!["line 2", "line 3", "line 4"]);
    }

    #[test]
    fn test_subscriber_writes_events() {
        let dir = tempfile::tempdir().unwrap();
        let sink = sink_in(dir.path(), 1024 * 1024, 10);
        let subscriber = builder(Arc::clone(&sink), Level::INFO).finish();

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("price sync done");
            tracing::debug!("filtered out");
        });

        let recent = sink.recent();
        assert_eq!(recent.len(), 1);
        assert!(recent[0].contains("INFO"));
        assert!(recent[0].ends_with("price sync done"));
        let file = fs::read_to_string(log_file_path(dir.path(), "test")).unwrap();
        assert!(file.contains("price sync done"));
    }

    #[test]
    fn test_tail() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        assert!(tail(&path, 5).unwrap().is_empty());

        fs::write(&path, "a\nb\nc\n").unwrap();
        assert_eq!(tail(&path, 2).unwrap(), vec!["b", "c"]);
        assert_eq!(tail(&path, 10).unwrap().len(), 3);
    }

    #[test]
    fn test_helpers_need_init() {
        if SINK.get().is_none() {
            assert!(matches!(info("hello"), Err(LoggerError::NotInitialized)));
            assert!(recent_lines().is_empty());
        }
    }
}
