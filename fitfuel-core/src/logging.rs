//! Logging infrastructure for fitfuel
//!
//! Logs go to a daily file in `$XDG_STATE_HOME/fitfuel/`
//! (`~/.local/state/fitfuel/fitfuel.YYYY-MM-DD.log`), optionally echoed to
//! stderr for interactive runs.

use crate::config::{Config, LoggingConfig};
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

const LOG_PREFIX: &str = "fitfuel";
const LOG_SUFFIX: &str = "log";

/// Initialize the logging system
///
/// The level comes from `RUST_LOG` when set, otherwise from `config.level`.
/// With `echo_stderr`, events are also written to stderr without file and
/// thread metadata.
pub fn init(config: &LoggingConfig, echo_stderr: bool) -> Result<LoggingGuard> {
    let log_dir = Config::state_dir();
    let appender = file_appender(&log_dir)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    let stderr_layer = echo_stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .with_target(false)
            .compact()
    });

    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| Error::Config(format!("logging already initialized: {}", e)))?;

    tracing::info!(
        log_dir = %log_dir.display(),
        level = %config.level,
        "Logging initialized"
    );

    Ok(LoggingGuard {
        log_dir,
        _guard: guard,
    })
}

/// Initialize logging for tests (captured test output, default level)
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(&LoggingConfig::default()))
        .with_test_writer()
        .with_span_events(FmtSpan::CLOSE)
        .try_init();
}

/// Guard that keeps the logging system alive
///
/// When dropped, flushes any pending log writes.
pub struct LoggingGuard {
    log_dir: PathBuf,
    _guard: tracing_appender::non_blocking::WorkerGuard,
}

impl LoggingGuard {
    /// Directory holding the dated log files
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}

fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Daily appender writing `fitfuel.YYYY-MM-DD.log` into `dir`.
fn file_appender(dir: &Path) -> Result<RollingFileAppender> {
    std::fs::create_dir_all(dir)?;

    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_PREFIX)
        .filename_suffix(LOG_SUFFIX)
        .build(dir)
        .map_err(|e| Error::Config(format!("failed to open log file in {:?}: {}", dir, e)))
}
