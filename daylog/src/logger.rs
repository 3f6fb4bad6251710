use std::{
    fmt, io,
    path::PathBuf,
    sync::{
        Arc, Mutex, PoisonError, RwLock, Weak,
        atomic::{AtomicBool, Ordering},
    },
};

use daylog_core::{
    Clock, DailyLogFile, NullSink, OutputSink, Palette, Severity, format_message, strip_ansi,
};

/// An interactive prompt that must be redrawn after log output overwrote it.
pub trait LineEditor: Send + Sync {
    fn refresh(&self) -> io::Result<()>;
}

enum Entry {
    Leveled(Severity, String),
    Raw(String),
}

/// Serializes console and file output for the whole process.
///
/// Every call takes the same lock for the rotation check, both writes and the
/// line editor refresh, so lines from different threads never interleave.
/// A [`LineEditor`] must not log from `refresh`: the lock is still held.
pub struct Logger {
    files: Mutex<Option<DailyLogFile>>,
    sink: RwLock<Arc<dyn OutputSink>>,
    line_editor: RwLock<Option<Weak<dyn LineEditor>>>,
    debug_enabled: AtomicBool,
    palette: Box<dyn Palette>,
    clock: Arc<dyn Clock>,
}

impl Logger {
    pub(crate) fn new(
        files: Option<DailyLogFile>,
        sink: Arc<dyn OutputSink>,
        debug_enabled: bool,
        palette: Box<dyn Palette>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            files: Mutex::new(files),
            sink: RwLock::new(sink),
            line_editor: RwLock::new(None),
            debug_enabled: AtomicBool::new(debug_enabled),
            palette,
            clock,
        }
    }

    /// Opens today's file right away instead of on the first message.
    pub(crate) fn open_today(&self) {
        let mut files = self.files.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(files) = files.as_mut() else {
            return;
        };
        match files.ensure_current(self.clock.now()) {
            Ok(opened) => {
                if opened {
                    self.announce_new_file(files);
                }
                self.notice(&format!(
                    "Logging system initialized. Logs will be saved in: {}",
                    files.folder().display()
                ));
            }
            Err(err) => self.warn(&format!("unable to open initial log file: {err}")),
        }
    }

    /// Writes a leveled message followed by a newline. Debug messages are
    /// dropped while debug output is disabled.
    pub fn log(&self, level: Severity, args: fmt::Arguments) {
        if level == Severity::Debug && !self.debug_enabled() {
            return;
        }
        self.dispatch(Entry::Leveled(level, args.to_string()));
    }

    pub fn debug(&self, args: fmt::Arguments) {
        self.log(Severity::Debug, args);
    }

    pub fn info(&self, args: fmt::Arguments) {
        self.log(Severity::Info, args);
    }

    pub fn important(&self, args: fmt::Arguments) {
        self.log(Severity::Important, args);
    }

    pub fn warning(&self, args: fmt::Arguments) {
        self.log(Severity::Warning, args);
    }

    pub fn error(&self, args: fmt::Arguments) {
        self.log(Severity::Error, args);
    }

    pub fn fatal(&self, args: fmt::Arguments) {
        self.log(Severity::Fatal, args);
    }

    pub fn success(&self, args: fmt::Arguments) {
        self.log(Severity::Success, args);
    }

    /// Writes text without timestamp, label or added newline. The file copy
    /// is stripped of escape codes and always ends with a newline.
    pub fn print_raw(&self, args: fmt::Arguments) {
        self.dispatch(Entry::Raw(args.to_string()));
    }

    pub fn set_debug_enabled(&self, enabled: bool) {
        self.debug_enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn debug_enabled(&self) -> bool {
        self.debug_enabled.load(Ordering::Relaxed)
    }

    pub fn set_output_sink(&self, sink: Arc<dyn OutputSink>) {
        *self.sink.write().unwrap_or_else(PoisonError::into_inner) = sink;
    }

    pub fn output_sink(&self) -> Arc<dyn OutputSink> {
        self.sink
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Registers the prompt to redraw after each message. Only a weak
    /// reference is kept.
    pub fn set_line_editor(&self, editor: &Arc<dyn LineEditor>) {
        *self
            .line_editor
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(Arc::downgrade(editor));
    }

    pub fn clear_line_editor(&self) {
        *self
            .line_editor
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn log_dir(&self) -> Option<PathBuf> {
        let files = self.files.lock().unwrap_or_else(PoisonError::into_inner);
        files.as_ref().map(|files| files.folder().to_path_buf())
    }

    pub fn current_log_file(&self) -> Option<PathBuf> {
        let files = self.files.lock().unwrap_or_else(PoisonError::into_inner);
        files
            .as_ref()
            .and_then(|files| files.current_path())
            .map(PathBuf::from)
    }

    fn dispatch(&self, entry: Entry) {
        let mut files = self.files.lock().unwrap_or_else(PoisonError::into_inner);
        let now = self.clock.now();
        if let Some(files) = files.as_mut() {
            match files.ensure_current(now) {
                Ok(true) => self.announce_new_file(files),
                Ok(false) => {}
                Err(err) => self.warn(&format!("unable to rotate log file: {err}")),
            }
        }

        let time = now.time();
        let (console, plain) = match entry {
            Entry::Leveled(level, message) => (
                format!(
                    "{}\n",
                    format_message(level, self.palette.as_ref(), time, &message)
                ),
                format!("{} {}\n", time.format("%H:%M:%S"), strip_ansi(&message)),
            ),
            Entry::Raw(text) => {
                let mut plain = strip_ansi(&text);
                if !plain.ends_with('\n') {
                    plain.push('\n');
                }
                (text, plain)
            }
        };

        let _ = self.output_sink().write_str(&console);
        if let Some(files) = files.as_mut()
            && !files.is_open()
        {
            self.warn("log file unavailable, message not written to file");
        } else if let Some(files) = files.as_mut()
            && let Err(err) = files.write_line(&plain)
        {
            self.warn(&format!("unable to write log file: {err}"));
        }
        self.refresh_line_editor();
    }

    fn refresh_line_editor(&self) {
        let editor = self
            .line_editor
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .and_then(Weak::upgrade);
        if let Some(editor) = editor {
            let _ = editor.refresh();
        }
    }

    fn announce_new_file(&self, files: &DailyLogFile) {
        if let Some(path) = files.current_path() {
            self.notice(&format!("Created new log file: {}", path.display()));
        }
    }

    /// Console-only status line, never copied to the file.
    fn notice(&self, message: &str) {
        let _ = self.output_sink().write_str(&format!("{message}\n"));
    }

    pub(crate) fn warn(&self, message: &str) {
        let tag = self
            .palette
            .scheme(Severity::Warning)
            .tag
            .paint("warning:");
        let _ = self.output_sink().write_str(&format!("{tag} {message}\n"));
    }
}

/// A sink that discards all output.
pub fn null_sink() -> Arc<dyn OutputSink> {
    Arc::new(NullSink)
}
