use chrono::NaiveTime;

use crate::severity::{Palette, Severity};

/// Builds the console line for a leveled message, without the trailing newline.
///
/// The line starts with a carriage return so it overwrites an in-progress
/// prompt, then `[HH:MM:SS] [lbl] message`.
pub fn format_message(
    level: Severity,
    palette: &dyn Palette,
    time: NaiveTime,
    message: &str,
) -> String {
    let scheme = palette.scheme(level);
    let time = palette.time().paint(&time.format("%H:%M:%S").to_string());
    let tag = scheme.tag.paint(level.label());
    let message = scheme.message.paint(message);
    format!("\r[{time}] [{tag}] {message}")
}

/// Removes terminal escape sequences.
///
/// An escape sequence runs from `ESC` up to and including the next ASCII
/// letter. A sequence left open at the end of the input is dropped.
pub fn strip_ansi(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_escape = false;
    for c in input.chars() {
        if in_escape {
            if c.is_ascii_alphabetic() {
                in_escape = false;
            }
        } else if c == '\x1B' {
            in_escape = true;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::severity::{DefaultPalette, PlainPalette};

    fn ten_thirty() -> NaiveTime {
        NaiveTime::from_hms_opt(10, 30, 0).unwrap()
    }

    #[test]
    fn test_strip_sgr_sequences() {
        assert_eq!(strip_ansi("\x1B[31mred\x1B[0m"), "red");
        assert_eq!(
            strip_ansi("\x1B[1;37;41merr\x1B[0m plain \x1B[32mgreen"),
            "err plain green"
        );
    }

    #[test]
    fn test_strip_keeps_unicode() {
        assert_eq!(
            strip_ansi("\x1B[33mпривет\x1B[0m, 世界 ✓ \x1B[2Kdone"),
            "привет, 世界 ✓ done"
        );
    }

    #[test]
    fn test_strip_unterminated_sequence() {
        assert_eq!(strip_ansi("tail\x1B[38;5;"), "tail");
        assert_eq!(strip_ansi("\x1B"), "");
    }

    #[test]
    fn test_strip_without_escapes_is_identity() {
        let text = "\r[10:30:00] [inf] nothing to strip 123;[]\n";
        assert_eq!(strip_ansi(text), text);
    }

    #[test]
    fn test_format_plain() {
        let line = format_message(Severity::Error, &PlainPalette, ten_thirty(), "failed: disk full");
        assert_eq!(line, "\r[10:30:00] [err] failed: disk full");
    }

    #[test]
    fn test_format_every_level() {
        for level in Severity::ALL {
            let line = format_message(level, &DefaultPalette, ten_thirty(), "message");
            assert!(line.starts_with('\r'));
            let plain = strip_ansi(&line);
            assert!(plain.contains(&format!("[{}]", level.label())), "{plain:?}");
            assert_eq!(plain, format!("\r[10:30:00] [{}] message", level.label()));
        }
    }
}
