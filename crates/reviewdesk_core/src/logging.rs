//! Process-wide log file setup.
//!
//! # Responsibility
//! - Start one `flexi_logger` rolling file backend per process.
//! - Keep core events metadata-only: ids, counts and timings, never review
//!   summaries or employee names.
//!
//! # Invariants
//! - A second `init_logging` with the same level and directory is a no-op.
//! - A second `init_logging` with any other settings is rejected.

use flexi_logger::{
    Cleanup, Criterion, FileSpec, FlexiLoggerError, Logger, LoggerHandle, Naming, WriteMode,
};
use log::{info, LevelFilter};
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::str::FromStr;

const LOG_FILE_BASENAME: &str = "reviewdesk";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

static ACTIVE_LOGGER: OnceCell<ActiveLogger> = OnceCell::new();

/// Level and directory of the running file logger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: LevelFilter,
    pub log_dir: PathBuf,
}

struct ActiveLogger {
    settings: LogSettings,
    _handle: LoggerHandle,
}

#[derive(Debug)]
pub enum LoggingError {
    UnsupportedLevel(String),
    RelativeLogDir(PathBuf),
    CreateLogDir {
        log_dir: PathBuf,
        source: std::io::Error,
    },
    Backend(FlexiLoggerError),
    AlreadyActive {
        active: LogSettings,
        requested: LogSettings,
    },
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedLevel(level) => write!(
                f,
                "unsupported log level `{level}`; expected trace|debug|info|warn|error"
            ),
            Self::RelativeLogDir(log_dir) => write!(
                f,
                "log directory must be an absolute path, got `{}`",
                log_dir.display()
            ),
            Self::CreateLogDir { log_dir, source } => write!(
                f,
                "failed to create log directory `{}`: {source}",
                log_dir.display()
            ),
            Self::Backend(err) => write!(f, "failed to start logger: {err}"),
            Self::AlreadyActive { active, requested } => write!(
                f,
                "logging already active ({} at `{}`); refusing to switch to {} at `{}`",
                active.level,
                active.log_dir.display(),
                requested.level,
                requested.log_dir.display()
            ),
        }
    }
}

impl Error for LoggingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CreateLogDir { source, .. } => Some(source),
            Self::Backend(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FlexiLoggerError> for LoggingError {
    fn from(value: FlexiLoggerError) -> Self {
        Self::Backend(value)
    }
}

/// Starts file logging at `level` (`trace|debug|info|warn|error`, any case)
/// under the absolute directory `log_dir`, creating it if needed.
pub fn init_logging(level: &str, log_dir: impl AsRef<Path>) -> Result<(), LoggingError> {
    let requested = LogSettings {
        level: parse_level(level)?,
        log_dir: absolute_dir(log_dir.as_ref())?,
    };

    let active = ACTIVE_LOGGER.get_or_try_init(|| start_logger(requested.clone()))?;
    if active.settings != requested {
        return Err(LoggingError::AlreadyActive {
            active: active.settings.clone(),
            requested,
        });
    }
    Ok(())
}

/// Returns the settings of the running logger, if any.
pub fn logging_status() -> Option<LogSettings> {
    ACTIVE_LOGGER.get().map(|active| active.settings.clone())
}

/// `debug` for debug builds, `info` otherwise.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start_logger(settings: LogSettings) -> Result<ActiveLogger, LoggingError> {
    std::fs::create_dir_all(&settings.log_dir).map_err(|source| LoggingError::CreateLogDir {
        log_dir: settings.log_dir.clone(),
        source,
    })?;

    let handle = Logger::try_with_str(settings.level.as_str().to_ascii_lowercase())?
        .log_to_file(
            FileSpec::default()
                .directory(settings.log_dir.as_path())
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()?;

    info!(
        "event=core_init module=core status=ok version={} level={} log_dir={}",
        env!("CARGO_PKG_VERSION"),
        settings.level,
        settings.log_dir.display()
    );

    Ok(ActiveLogger {
        settings,
        _handle: handle,
    })
}

fn parse_level(level: &str) -> Result<LevelFilter, LoggingError> {
    match LevelFilter::from_str(level.trim()) {
        Ok(LevelFilter::Off) | Err(_) => Err(LoggingError::UnsupportedLevel(level.to_string())),
        Ok(filter) => Ok(filter),
    }
}

fn absolute_dir(log_dir: &Path) -> Result<PathBuf, LoggingError> {
    if !log_dir.is_absolute() {
        return Err(LoggingError::RelativeLogDir(log_dir.to_path_buf()));
    }
    Ok(log_dir.to_path_buf())
}
