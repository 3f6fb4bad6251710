//! # daylog-core
//! Core utilities for daylog - formatting, ANSI stripping, output sinks and daily log files.

mod clock;
mod config;
mod error;
mod log_rotation;
mod log_writer;
mod severity;
mod utils;

pub use colored::Color;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{DAYLOG_CONFIG, DaylogConfig};
pub use error::LogError;
pub use log_rotation::{
    DailyLogConfig, DailyLogFile, RotationPolicy, create_log_dir, default_log_dir, log_file_name,
};
pub use log_writer::{MemorySink, NullSink, OutputSink, StdoutSink, WriterSink};
pub use severity::{ColorScheme, DefaultPalette, Palette, PlainPalette, Severity, Style};
pub use utils::{format_message, strip_ansi};
