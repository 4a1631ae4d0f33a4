//! Console and file logging for the checker.
//!
//! A [`LogConfig`] describes which outputs are wanted; [`build`] turns it into
//! a fresh subscriber and [`init`] installs that subscriber process-wide.
//! The console output is limited to INFO and above, the file output follows
//! the configured level and is always appended to.

#[cfg(test)]
pub mod capture;
pub mod format;

use std::fmt;
use std::fs::OpenOptions;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{Local, NaiveDate};
use tracing::Subscriber;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;

pub use format::{ConsoleFormat, FileFormat};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub console: bool,
    pub file: Option<PathBuf>,
    pub level: LevelFilter,
    /// Append the current date (`YYYYMMDD`) to the log file name
    pub dated: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            console: true,
            file: None,
            level: LevelFilter::INFO,
            dated: false,
        }
    }
}

impl LogConfig {
    /// Path of the log file for a run on `date`, if file logging is enabled.
    pub fn log_path(&self, date: NaiveDate) -> Option<PathBuf> {
        let path = self.file.as_deref()?;
        if !self.dated {
            return Some(path.to_path_buf());
        }

        Some(dated_path(path, date))
    }
}

fn dated_path(path: &Path, date: NaiveDate) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "log".to_string());

    path.with_file_name(format!("{}{}.{}", stem, date.format("%Y%m%d"), extension))
}

#[derive(Debug)]
pub enum LoggerError {
    File {
        path: PathBuf,
        source: std::io::Error,
    },
    Init(tracing::subscriber::SetGlobalDefaultError),
}

impl fmt::Display for LoggerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoggerError::File { path, source } => {
                write!(f, "Cannot open log file {}: {}", path.display(), source)
            }
            LoggerError::Init(e) => write!(f, "Failed to install logger: {}", e),
        }
    }
}

impl std::error::Error for LoggerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoggerError::File { source, .. } => Some(source),
            LoggerError::Init(e) => Some(e),
        }
    }
}

impl From<tracing::subscriber::SetGlobalDefaultError> for LoggerError {
    fn from(err: tracing::subscriber::SetGlobalDefaultError) -> LoggerError {
        LoggerError::Init(err)
    }
}

/// Builds a subscriber logging to stderr and/or the configured file.
pub fn build(config: &LogConfig) -> Result<impl Subscriber + Send + Sync + use<>, LoggerError> {
    let ansi = std::io::stderr().is_terminal();
    build_with_console(config, std::io::stderr, ansi)
}

/// Same as [`build`], with the console output sent to `console`.
pub fn build_with_console<W>(
    config: &LogConfig,
    console: W,
    ansi: bool,
) -> Result<impl Subscriber + Send + Sync + use<W>, LoggerError>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let file_layer = match config.log_path(Local::now().date_naive()) {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|source| LoggerError::File { path, source })?;

            Some(
                tracing_subscriber::fmt::layer()
                    .event_format(FileFormat)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .with_filter(config.level),
            )
        }
        None => None,
    };

    let console_layer = config.console.then(|| {
        tracing_subscriber::fmt::layer()
            .event_format(ConsoleFormat)
            .with_ansi(ansi)
            .with_writer(console)
            .with_filter(LevelFilter::INFO)
    });

    Ok(tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer))
}

/// Installs the subscriber described by `config` as the global default.
pub fn init(config: &LogConfig) -> Result<(), LoggerError> {
    let subscriber = build(config)?;
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
