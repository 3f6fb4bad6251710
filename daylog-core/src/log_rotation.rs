use std::{
    fs::{self, File, OpenOptions},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
    sync::LazyLock,
};

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime};
use regex::Regex;

use crate::error::LogError;

static LOG_FILE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^log_(\d{4}-\d{2}-\d{2})\.txt$").unwrap());

/// When a new daily file is due.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RotationPolicy {
    /// Rotate whenever the calendar date changes.
    #[default]
    CalendarDate,
    /// Rotate only when the day of the month changes. Two runs on the 15th of
    /// consecutive months keep writing to the first month's file.
    DayOfMonth,
}

impl RotationPolicy {
    fn is_due(self, last: NaiveDate, today: NaiveDate) -> bool {
        match self {
            RotationPolicy::CalendarDate => last != today,
            RotationPolicy::DayOfMonth => last.day() != today.day(),
        }
    }
}

/// Configuration for date-based log files.
#[derive(Debug, Clone)]
pub struct DailyLogConfig {
    pub folder: PathBuf,
    pub policy: RotationPolicy,
    /// Files dated more than this many days before today are removed on rotation.
    pub retention_days: Option<u64>,
}

struct OpenLog {
    file: BufWriter<File>,
    date: NaiveDate,
    path: PathBuf,
}

/// Owns the single open `log_YYYY-MM-DD.txt` file and replaces it when the date moves on.
pub struct DailyLogFile {
    folder: PathBuf,
    policy: RotationPolicy,
    retention_days: Option<u64>,
    current: Option<OpenLog>,
}

impl DailyLogFile {
    /// Does not touch the file system; the first [`ensure_current`](Self::ensure_current) opens the file.
    pub fn new(config: DailyLogConfig) -> Self {
        Self {
            folder: config.folder,
            policy: config.policy,
            retention_days: config.retention_days.filter(|days| *days > 0),
            current: None,
        }
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.current.as_ref().map(|open| open.path.as_path())
    }

    pub fn current_date(&self) -> Option<NaiveDate> {
        self.current.as_ref().map(|open| open.date)
    }

    /// Opens the file for `now`'s date if none is open or the date moved on.
    ///
    /// Returns `Ok(true)` when a new file was opened. On error the previous
    /// file is already closed; every later call retries until an open succeeds.
    pub fn ensure_current(&mut self, now: NaiveDateTime) -> Result<bool, LogError> {
        let today = now.date();
        if let Some(open) = &self.current
            && !self.policy.is_due(open.date, today)
        {
            return Ok(false);
        }
        self.rotate(today)?;
        Ok(true)
    }

    /// Appends `text` to the open file and flushes it.
    pub fn write_line(&mut self, text: &str) -> Result<(), LogError> {
        let Some(open) = self.current.as_mut() else {
            return Err(LogError::file_system(
                &self.folder,
                io::Error::new(io::ErrorKind::NotConnected, "no log file is open"),
            ));
        };
        open.file
            .write_all(text.as_bytes())
            .and_then(|()| open.file.flush())
            .map_err(|e| LogError::file_system(&open.path, e))
    }

    fn rotate(&mut self, today: NaiveDate) -> Result<(), LogError> {
        self.close();
        if !self.folder.is_dir() {
            return Err(LogError::MissingDirectory(self.folder.clone()));
        }
        let path = self.folder.join(log_file_name(today));
        let file = open_append(&path).map_err(|e| LogError::file_system(&path, e))?;
        self.current = Some(OpenLog {
            file: BufWriter::new(file),
            date: today,
            path,
        });
        self.cleanup(today);
        Ok(())
    }

    fn close(&mut self) {
        if let Some(mut open) = self.current.take() {
            let _ = open.file.flush();
        }
    }

    /// Removes daily files older than the retention window. Returns how many were deleted.
    pub fn cleanup(&self, today: NaiveDate) -> usize {
        let Some(days) = self.retention_days else {
            return 0;
        };
        let Some(cutoff) = today.checked_sub_days(Days::new(days)) else {
            return 0;
        };
        let Ok(entries) = fs::read_dir(&self.folder) else {
            return 0;
        };
        let mut removed = 0;
        for entry in entries.flatten() {
            let name = entry.file_name().to_string_lossy().to_string();
            let Some(date) = LOG_FILE_NAME
                .captures(&name)
                .and_then(|caps| NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d").ok())
            else {
                continue;
            };
            if date < cutoff && fs::remove_file(entry.path()).is_ok() {
                removed += 1;
            }
        }
        removed
    }
}

impl Drop for DailyLogFile {
    fn drop(&mut self) {
        self.close();
    }
}

pub fn log_file_name(date: NaiveDate) -> String {
    format!("log_{}.txt", date.format("%Y-%m-%d"))
}

/// `<directory of the running executable>/<dir_name>`.
pub fn default_log_dir(dir_name: &str) -> Result<PathBuf, LogError> {
    let exe = std::env::current_exe().map_err(LogError::PathResolution)?;
    let dir = exe.parent().ok_or_else(|| {
        LogError::PathResolution(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} has no parent directory", exe.display()),
        ))
    })?;
    Ok(dir.join(dir_name))
}

/// Creates the log directory and its parents, world-writable on Unix.
pub fn create_log_dir(path: &Path) -> Result<(), LogError> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o777);
    }
    builder
        .create(path)
        .map_err(|e| LogError::file_system(path, e))
}

fn open_append(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.create(true).append(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o666);
    }
    options.open(path)
}
