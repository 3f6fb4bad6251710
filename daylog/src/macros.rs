#[doc(hidden)]
#[macro_export]
macro_rules! __daylog_log {
    ($level:expr, logger: $logger:expr, $($arg:tt)+) => {
        $logger.log($level, format_args!($($arg)+))
    };
    ($level:expr, $($arg:tt)+) => {
        $crate::logger().log($level, format_args!($($arg)+))
    };
}

/// Logs at debug level; dropped while debug output is disabled.
///
/// Every leveled macro accepts an optional `logger: <expr>,` first argument to
/// target a specific [`Logger`](crate::Logger) instead of the global one.
#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => { $crate::__daylog_log!($crate::Severity::Debug, $($arg)+) };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => { $crate::__daylog_log!($crate::Severity::Info, $($arg)+) };
}

#[macro_export]
macro_rules! important {
    ($($arg:tt)+) => { $crate::__daylog_log!($crate::Severity::Important, $($arg)+) };
}

#[macro_export]
macro_rules! warning {
    ($($arg:tt)+) => { $crate::__daylog_log!($crate::Severity::Warning, $($arg)+) };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => { $crate::__daylog_log!($crate::Severity::Error, $($arg)+) };
}

#[macro_export]
macro_rules! fatal {
    ($($arg:tt)+) => { $crate::__daylog_log!($crate::Severity::Fatal, $($arg)+) };
}

#[macro_export]
macro_rules! success {
    ($($arg:tt)+) => { $crate::__daylog_log!($crate::Severity::Success, $($arg)+) };
}

/// Writes text as is, without timestamp, label or trailing newline.
#[macro_export]
macro_rules! print_raw {
    (logger: $logger:expr, $($arg:tt)+) => {
        $logger.print_raw(format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::logger().print_raw(format_args!($($arg)+))
    };
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{ManualClock, MemorySink, logger_config};

    #[test]
    fn test_macros_with_explicit_logger() {
        let sink = MemorySink::default();
        let now = chrono::NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        let logger = logger_config()
            .no_file()
            .no_color()
            .with_debug(false)
            .with_sink(Arc::new(sink.clone()))
            .with_clock(Arc::new(ManualClock::new(now)))
            .build();

        crate::debug!(logger: &logger, "not shown");
        crate::info!(logger: &logger, "{} + {} = {}", 1, 1, 2);
        crate::error!(logger: &logger, "failed: {}", "disk full");
        crate::fatal!(logger: logger, "fatal");
        crate::print_raw!(logger: &logger, "{}", "raw");

        assert_eq!(
            sink.contents(),
            "\r[10:30:00] [inf] 1 + 1 = 2\n\
             \r[10:30:00] [err] failed: disk full\n\
             \r[10:30:00] [!!!] fatal\n\
             raw"
        );
    }
}
