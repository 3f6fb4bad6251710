//! # daylog
//! Process-wide console logger with colored leveled output and a plain-text
//! copy in a daily log file.
//!
//! ## Usage
//! ```toml
//! // Cargo.toml
//! ...
//! [dependencies]
//! daylog = "0.1.0"
//! ```
//!
//! ```rust,no_run
//! use daylog::{error, info, success};
//!
//! // The first call sets up `<executable dir>/logs/log_YYYY-MM-DD.txt`.
//! info!("starting up");
//! error!("failed: {}", "disk full");
//! success!("recovered");
//! ```
//!
//! ## Explicit logger
//! A [`Logger`] can also be built and passed around, which is what tests do.
//!
//! ```rust
//! use std::sync::Arc;
//! use daylog::{MemorySink, logger_config};
//!
//! let sink = MemorySink::default();
//! let logger = logger_config()
//!     .no_file()
//!     .no_color()
//!     .with_sink(Arc::new(sink.clone()))
//!     .build();
//! daylog::warning!(logger: &logger, "low disk space: {}%", 5);
//! assert!(sink.contents().ends_with("[war] low disk space: 5%\n"));
//! ```
//!
//! ## Configuration
//! Defaults come from the environment: `DAYLOG_DEBUG`, `DAYLOG_DIR_NAME`,
//! `DAYLOG_RETENTION_DAYS`, `DAYLOG_DAY_OF_MONTH_ROTATION` and `DAYLOG_NO_COLOR`.

mod logger;
mod macros;

use std::{
    path::PathBuf,
    sync::{Arc, OnceLock},
};

use daylog_core::{DAYLOG_CONFIG, DailyLogConfig, DailyLogFile, create_log_dir, default_log_dir};
use log::{LevelFilter, Log};

pub use daylog_core::{
    Clock, Color, ColorScheme, DaylogConfig, DefaultPalette, LogError, ManualClock, MemorySink,
    NullSink, OutputSink, Palette, PlainPalette, RotationPolicy, Severity, StdoutSink, Style,
    SystemClock, WriterSink, format_message, log_file_name, strip_ansi,
};
pub use logger::{LineEditor, Logger, null_sink};

static GLOBAL_LOGGER: OnceLock<Logger> = OnceLock::new();

/// The process-wide logger. Built from the environment defaults on first use
/// unless [`ConfigBuilder::init_global`] ran before.
pub fn logger() -> &'static Logger {
    GLOBAL_LOGGER.get_or_init(|| logger_config().build())
}

/// Builder for configuring and initializing the logger.
pub struct ConfigBuilder {
    log_dir: Option<PathBuf>,
    no_file: bool,
    debug: bool,
    sink: Arc<dyn OutputSink>,
    palette: Box<dyn Palette>,
    clock: Arc<dyn Clock>,
    policy: RotationPolicy,
    retention_days: Option<u64>,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::from_config(&DAYLOG_CONFIG)
    }
}

impl ConfigBuilder {
    /// Starting point taken from `config` instead of the process environment.
    pub fn from_config(config: &DaylogConfig) -> Self {
        let palette: Box<dyn Palette> = if config.NO_COLOR {
            Box::new(PlainPalette)
        } else {
            Box::new(DefaultPalette)
        };
        let policy = if config.DAY_OF_MONTH_ROTATION {
            RotationPolicy::DayOfMonth
        } else {
            RotationPolicy::CalendarDate
        };
        Self {
            log_dir: None,
            no_file: false,
            debug: config.DEBUG,
            sink: Arc::new(StdoutSink),
            palette,
            clock: Arc::new(SystemClock),
            policy,
            retention_days: Some(config.RETENTION_DAYS),
        }
    }

    /// Builds the logger: creates the log directory and opens today's file.
    /// Failures are reported on the sink; the file is retried on every
    /// message until it opens.
    pub fn build(self) -> Logger {
        let Self {
            log_dir,
            no_file,
            debug,
            sink,
            palette,
            clock,
            policy,
            retention_days,
        } = self;
        let mut startup_errors = Vec::new();
        let files = if no_file {
            None
        } else {
            let folder = match log_dir {
                Some(dir) => Some(dir),
                None => match default_log_dir(&DAYLOG_CONFIG.DIR_NAME) {
                    Ok(dir) => Some(dir),
                    Err(err) => {
                        startup_errors.push(err);
                        None
                    }
                },
            };
            let folder = match folder {
                Some(folder) => {
                    if let Err(err) = create_log_dir(&folder) {
                        startup_errors.push(err);
                    }
                    folder
                }
                None => PathBuf::from(&DAYLOG_CONFIG.DIR_NAME),
            };
            Some(DailyLogFile::new(DailyLogConfig {
                folder,
                policy,
                retention_days,
            }))
        };
        let logger = Logger::new(files, sink, debug, palette, clock);
        for err in startup_errors {
            logger.warn(&format!("logging setup failed: {err}"));
        }
        logger.open_today();
        logger
    }

    /// Installs the built logger as the process-wide one.
    pub fn init_global(self) -> Result<&'static Logger, LogError> {
        if GLOBAL_LOGGER.get().is_some() {
            return Err(LogError::AlreadyInitialized);
        }
        GLOBAL_LOGGER
            .set(self.build())
            .map_err(|_| LogError::AlreadyInitialized)?;
        Ok(logger())
    }

    /// Writes daily files into `dir` instead of next to the executable.
    pub fn with_log_dir<P: Into<PathBuf>>(self, dir: P) -> Self {
        Self {
            log_dir: Some(dir.into()),
            ..self
        }
    }
    /// Console only; no file and no file warnings.
    pub fn no_file(self) -> Self {
        Self {
            no_file: true,
            ..self
        }
    }
    /// Initial state of the debug flag.
    pub fn with_debug(self, enabled: bool) -> Self {
        Self {
            debug: enabled,
            ..self
        }
    }
    pub fn with_sink(self, sink: Arc<dyn OutputSink>) -> Self {
        Self { sink, ..self }
    }
    pub fn with_palette<P: Palette + 'static>(self, palette: P) -> Self {
        Self {
            palette: Box::new(palette),
            ..self
        }
    }
    /// Disable colors on the console
    pub fn no_color(self) -> Self {
        self.with_palette(PlainPalette)
    }
    pub fn with_clock(self, clock: Arc<dyn Clock>) -> Self {
        Self { clock, ..self }
    }
    pub fn with_rotation_policy(self, policy: RotationPolicy) -> Self {
        Self { policy, ..self }
    }
    /// Remove daily files older than `days` on each rotation. 0 keeps everything.
    pub fn with_retention_days(self, days: u64) -> Self {
        Self {
            retention_days: Some(days),
            ..self
        }
    }
}

/// Returns a default ConfigBuilder for configuring the logger.
pub fn logger_config() -> ConfigBuilder {
    ConfigBuilder::default()
}

/// Forwards `log` records to the global logger.
struct LogFacade;

impl Log for LogFacade {
    fn enabled(&self, _: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        logger().log(Severity::from(record.level()), *record.args());
    }

    fn flush(&self) {}
}

/// Routes `log::info!` and friends through daylog. Trace records show up as debug.
pub fn init_log_facade(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    log::set_logger(&LogFacade)?;
    log::set_max_level(level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults_follow_environment_config() {
        let builder = logger_config();
        assert_eq!(builder.debug, DAYLOG_CONFIG.DEBUG);
        assert!(builder.log_dir.is_none());
        assert!(!builder.no_file);
    }

    #[test]
    fn test_environment_config_picks_palette_and_policy() {
        let defaults = ConfigBuilder::from_config(&DaylogConfig::default());
        assert_ne!(defaults.palette.scheme(Severity::Error), ColorScheme::default());
        assert_eq!(defaults.policy, RotationPolicy::CalendarDate);
        assert_eq!(defaults.retention_days, Some(0));
        assert!(defaults.debug);

        let config = DaylogConfig {
            DEBUG: false,
            RETENTION_DAYS: 3,
            DAY_OF_MONTH_ROTATION: true,
            NO_COLOR: true,
            ..Default::default()
        };
        let builder = ConfigBuilder::from_config(&config);
        assert_eq!(builder.palette.scheme(Severity::Error), ColorScheme::default());
        assert_eq!(builder.palette.scheme(Severity::Success), ColorScheme::default());
        assert_eq!(builder.policy, RotationPolicy::DayOfMonth);
        assert_eq!(builder.retention_days, Some(3));
        assert!(!builder.debug);
    }

    #[test]
    fn test_log_dir_is_reported() {
        let dir = tempfile::TempDir::new().unwrap();
        let logger = logger_config()
            .with_log_dir(dir.path().join("nested").join("logs"))
            .with_sink(null_sink())
            .build();
        assert_eq!(
            logger.log_dir().unwrap(),
            dir.path().join("nested").join("logs")
        );
        assert!(logger.current_log_file().is_some());
    }

    #[test]
    fn test_global_logger_and_facade() {
        let dir = tempfile::TempDir::new().unwrap();
        let sink = MemorySink::default();
        let installed = logger_config()
            .with_log_dir(dir.path())
            .with_sink(Arc::new(sink.clone()))
            .no_color()
            .init_global()
            .unwrap();
        assert!(std::ptr::eq(installed, logger()));
        assert!(matches!(
            logger_config().no_file().init_global(),
            Err(LogError::AlreadyInitialized)
        ));

        crate::important!("from macro {}", 1);
        crate::print_raw!("raw {}\n", 2);
        init_log_facade(LevelFilter::Info).unwrap();
        log::warn!("from log crate");
        log::debug!("filtered by max level");

        let console = sink.contents();
        assert!(console.contains("[imp] from macro 1\n"));
        assert!(console.contains("raw 2\n"));
        assert!(console.contains("[war] from log crate\n"));
        assert!(!console.contains("filtered by max level"));

        let file = std::fs::read_to_string(logger().current_log_file().unwrap()).unwrap();
        assert!(file.contains(" from macro 1\n"));
        assert!(file.contains("raw 2\n"));
        assert!(file.contains(" from log crate\n"));
    }
}
