//! Public logging macros.
//!
//! Each macro captures `file!()` and `line!()` at its own expansion
//! site, so call-site attribution always points at the public logging
//! call and never at an internal frame. Arguments are anything
//! `format_args!` accepts: a bare literal or a format string with
//! arguments.

/// Logs at FATAL severity, then terminates the process with a non-zero
/// exit status. FATAL has the lowest ordinal, so the line is written at
/// every threshold.
#[macro_export]
macro_rules! fatal {
    ($($arg:tt)*) => {{
        $crate::__log(
            $crate::Severity::Fatal,
            ::core::format_args!($($arg)*),
            ::core::file!(),
            ::core::line!(),
        );
        ::std::process::exit(1)
    }};
}

/// Logs at ERROR severity.
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::__log(
            $crate::Severity::Error,
            ::core::format_args!($($arg)*),
            ::core::file!(),
            ::core::line!(),
        )
    };
}

/// Logs at WARN severity.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::__log(
            $crate::Severity::Warn,
            ::core::format_args!($($arg)*),
            ::core::file!(),
            ::core::line!(),
        )
    };
}

/// Logs at INFO severity.
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::__log(
            $crate::Severity::Info,
            ::core::format_args!($($arg)*),
            ::core::file!(),
            ::core::line!(),
        )
    };
}

/// Logs at DEBUG severity.
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        $crate::__log(
            $crate::Severity::Debug,
            ::core::format_args!($($arg)*),
            ::core::file!(),
            ::core::line!(),
        )
    };
}

/// Writes an unleveled line to the named access channel. Never filtered
/// by the threshold; a name with no registered channel is a silent
/// no-op.
#[macro_export]
macro_rules! access {
    ($channel:expr, $($arg:tt)*) => {
        $crate::__access($channel, ::core::format_args!($($arg)*))
    };
}
