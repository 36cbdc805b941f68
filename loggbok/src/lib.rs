//! # loggbok
//!
//! Process-wide leveled logging (FATAL/ERROR/WARN/INFO/DEBUG) to a
//! default channel, plus named access channels that write unformatted
//! lines to their own files. All file-backed channels rotate daily: the
//! live file is renamed with the date it was opened for (for example
//! `access.log2016-07-05`) and a fresh file is started. Old files are
//! never pruned.
//!
//! The facility is a process-wide singleton: call the `set_*` functions
//! (or [`LogConfig::apply`]) once at startup, before spawning anything
//! that logs. The default channel is bound to standard output until
//! configured, so leveled logging works with zero setup:
//!
//! ```no_run
//! loggbok::set_level("INFO").unwrap();
//! loggbok::set_default_log_file("/var/log/app.log").unwrap();
//! loggbok::set_access_log_file("order", "/var/log/order.log").unwrap();
//!
//! loggbok::info!("listening on {}", 8080);
//! loggbok::access!("order", "order {} accepted", 42);
//! ```

pub mod config;
mod dispatch;
#[macro_use]
mod macros;
mod registry;
mod scheduler;

pub use config::{AccessChannelConfig, ConfigError, LogConfig};
pub use loggbok_core::{level, set_level, write_failure_count, LogError, Severity};
pub use registry::{set_access_log_file, set_default_log_file};
pub use scheduler::shutdown_rotation;

#[doc(hidden)]
pub use dispatch::{__access, __log};

pub mod prelude {
    pub use crate::config::LogConfig;
    pub use crate::{access, debug, error, fatal, info, warn};
    pub use crate::{
        level, set_access_log_file, set_default_log_file, set_level, LogError, Severity,
    };
}
