//! # loggbok-core
//!
//! Invariant-carrying layer of the loggbok logging facility: the ordered
//! severity scale with its process-wide gate, and the per-channel
//! rotating file writer.
//!
//! Everything here is safe to call from parallel threads. The gate is a
//! single atomic; each writer serializes its writes and rotations behind
//! one mutex so rotation can never tear a line or run twice for the same
//! day.

pub mod error;
pub mod level;
pub mod writer;

pub use error::LogError;
pub use level::{enabled, level, set_level, Severity};
pub use writer::{write_failure_count, RotatingWriter};
