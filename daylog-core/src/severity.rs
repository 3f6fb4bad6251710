use colored::{Color, Colorize};

/// The seven fixed logging levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Debug,
    Info,
    Important,
    Warning,
    Error,
    Fatal,
    Success,
}

impl Severity {
    pub const ALL: [Severity; 7] = [
        Severity::Debug,
        Severity::Info,
        Severity::Important,
        Severity::Warning,
        Severity::Error,
        Severity::Fatal,
        Severity::Success,
    ];

    /// Three-character label shown between brackets.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Debug => "dbg",
            Severity::Info => "inf",
            Severity::Important => "imp",
            Severity::Warning => "war",
            Severity::Error => "err",
            Severity::Fatal => "!!!",
            Severity::Success => "+++",
        }
    }
}

impl From<log::Level> for Severity {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Severity::Error,
            log::Level::Warn => Severity::Warning,
            log::Level::Info => Severity::Info,
            log::Level::Debug | log::Level::Trace => Severity::Debug,
        }
    }
}

/// Foreground, background and weight of a painted fragment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: bool,
}

impl Style {
    pub const fn plain() -> Self {
        Self {
            fg: None,
            bg: None,
            bold: false,
        }
    }

    pub const fn fg(color: Color) -> Self {
        Self {
            fg: Some(color),
            bg: None,
            bold: false,
        }
    }

    pub const fn on(fg: Color, bg: Color) -> Self {
        Self {
            fg: Some(fg),
            bg: Some(bg),
            bold: false,
        }
    }

    pub const fn bold(self) -> Self {
        Self { bold: true, ..self }
    }

    pub fn paint(&self, text: &str) -> String {
        if *self == Self::plain() {
            return text.to_owned();
        }
        let mut painted = text.normal();
        if let Some(fg) = self.fg {
            painted = painted.color(fg);
        }
        if let Some(bg) = self.bg {
            painted = painted.on_color(bg);
        }
        if self.bold {
            painted = painted.bold();
        }
        painted.to_string()
    }
}

/// Styles for the bracketed label and for the message body of one severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorScheme {
    pub tag: Style,
    pub message: Style,
}

/// Maps a severity to its color scheme, independently of the dispatch logic.
pub trait Palette: Send + Sync {
    fn scheme(&self, level: Severity) -> ColorScheme;

    /// Style of the `HH:MM:SS` stamp.
    fn time(&self) -> Style {
        Style::plain()
    }
}

/// Terminal colors used by default.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultPalette;

impl Palette for DefaultPalette {
    fn scheme(&self, level: Severity) -> ColorScheme {
        let (tag, message) = match level {
            Severity::Debug => (
                Style::on(Color::Black, Color::BrightBlack),
                Style::fg(Color::BrightBlack),
            ),
            Severity::Info => (Style::on(Color::Green, Color::Black), Style::plain()),
            Severity::Important => (Style::on(Color::White, Color::BrightBlue), Style::plain()),
            Severity::Warning => (
                Style::on(Color::BrightYellow, Color::Black),
                Style::plain(),
            ),
            Severity::Error => (Style::on(Color::White, Color::Red), Style::fg(Color::Red)),
            Severity::Fatal => (
                Style::on(Color::Black, Color::Red),
                Style::fg(Color::Red).bold(),
            ),
            Severity::Success => (
                Style::on(Color::White, Color::Green),
                Style::fg(Color::Green),
            ),
        };
        ColorScheme { tag, message }
    }
}

/// No styling at all, for CI logs and other non-interactive output.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainPalette;

impl Palette for PlainPalette {
    fn scheme(&self, _: Severity) -> ColorScheme {
        ColorScheme::default()
    }
}
