//! Level-gated dispatch and line formatting.
//!
//! Leveled lines: `<timestamp> <file>:<line>: [<LEVEL>] <message>`.
//! Access lines: `<timestamp> <message>`, no level tag, no gating.
//! The gate check runs before any formatting, so a suppressed call costs
//! one atomic load and a branch.

use std::fmt::Arguments;

use chrono::Local;

use loggbok_core::{enabled, LogError, Severity};

use crate::registry::REGISTRY;

const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Call sites report the source file via `file!()`; only the basename is
/// emitted.
fn short_file(file: &str) -> &str {
    file.rsplit(['/', '\\']).next().unwrap_or(file)
}

#[doc(hidden)]
pub fn __log(severity: Severity, args: Arguments<'_>, file: &str, line: u32) {
    if !enabled(severity) {
        return;
    }
    let formatted = format!(
        "{} {}:{}: [{}] {}",
        Local::now().format(TIMESTAMP_FORMAT),
        short_file(file),
        line,
        severity.tag(),
        args
    );
    REGISTRY.default_channel().write_line(&formatted);
}

#[doc(hidden)]
pub fn __access(name: &str, args: Arguments<'_>) {
    // Unregistered channels are not an error: the call is dropped so
    // callers may log to a channel that is only configured in some
    // environments.
    let Some(channel) = REGISTRY.access_channel(name) else {
        return;
    };
    channel.write_line(&format!(
        "{} {}",
        Local::now().format(TIMESTAMP_FORMAT),
        args
    ));
}

/// Reports an internal failure (rotation rename, reopen) through the
/// default channel. Steady-state failures never propagate to logging
/// callers.
pub(crate) fn report_internal_error(err: &LogError) {
    __log(Severity::Error, format_args!("{err}"), file!(), line!());
}
