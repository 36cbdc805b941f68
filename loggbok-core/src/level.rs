//! ## loggbok-core::level
//! **Severity ordering and the process-wide level gate**
//!
//! The threshold is a single shared scalar. A plain atomic is enough:
//! a level change racing a concurrent gate check can misfilter at most
//! one line, which is an accepted outcome, so no lock is taken on the
//! hot path.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::error::LogError;

/// Log severity. Lower ordinal is more severe; a message is emitted iff
/// its ordinal is less than or equal to the current threshold's ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Severity {
    Fatal = 0,
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
}

impl Severity {
    const ALL: [Severity; 5] = [
        Severity::Fatal,
        Severity::Error,
        Severity::Warn,
        Severity::Info,
        Severity::Debug,
    ];

    /// Upper-case tag used in formatted output, e.g. `[ERROR]`.
    pub fn tag(self) -> &'static str {
        match self {
            Severity::Fatal => "FATAL",
            Severity::Error => "ERROR",
            Severity::Warn => "WARN",
            Severity::Info => "INFO",
            Severity::Debug => "DEBUG",
        }
    }

    fn from_ordinal(v: u8) -> Severity {
        match v {
            0 => Severity::Fatal,
            1 => Severity::Error,
            2 => Severity::Warn,
            3 => Severity::Info,
            _ => Severity::Debug,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Severity {
    type Err = LogError;

    /// Case-insensitive lookup over the five recognized names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "FATAL" => Ok(Severity::Fatal),
            "ERROR" => Ok(Severity::Error),
            "WARN" => Ok(Severity::Warn),
            "INFO" => Ok(Severity::Info),
            "DEBUG" => Ok(Severity::Debug),
            _ => Err(LogError::UnknownLevel(s.to_string())),
        }
    }
}

static THRESHOLD: AtomicU8 = AtomicU8::new(Severity::Debug as u8);

/// Sets the process-wide threshold from a level name.
///
/// Unknown names return [`LogError::UnknownLevel`] and leave the previous
/// threshold in place.
pub fn set_level(name: &str) -> Result<(), LogError> {
    let level: Severity = name.parse()?;
    THRESHOLD.store(level as u8, Ordering::Relaxed);
    Ok(())
}

/// Returns the current process-wide threshold.
pub fn level() -> Severity {
    Severity::from_ordinal(THRESHOLD.load(Ordering::Relaxed))
}

/// Gate check for a leveled call. This is the dominant fast path for
/// suppressed messages.
#[inline]
pub fn enabled(severity: Severity) -> bool {
    severity as u8 <= THRESHOLD.load(Ordering::Relaxed)
}
