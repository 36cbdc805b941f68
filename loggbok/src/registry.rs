//! Process-wide channel registry.
//!
//! Holds the default leveled channel (bound to stdout until configured)
//! and the named access channels. Channels are created by the setup
//! calls and live for the process lifetime; their handles close
//! implicitly at exit.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use loggbok_core::{LogError, RotatingWriter};

use crate::scheduler;

pub(crate) struct ChannelRegistry {
    default: RwLock<Arc<RotatingWriter>>,
    access: RwLock<HashMap<String, Arc<RotatingWriter>>>,
}

pub(crate) static REGISTRY: Lazy<ChannelRegistry> = Lazy::new(|| ChannelRegistry {
    default: RwLock::new(Arc::new(RotatingWriter::stdout())),
    access: RwLock::new(HashMap::new()),
});

impl ChannelRegistry {
    pub(crate) fn default_channel(&self) -> Arc<RotatingWriter> {
        Arc::clone(&self.default.read())
    }

    pub(crate) fn access_channel(&self, name: &str) -> Option<Arc<RotatingWriter>> {
        self.access.read().get(name).cloned()
    }

    /// Every file-backed channel, for the rotation sweep. Stdout-bound
    /// channels are excluded since they never rotate.
    pub(crate) fn rotating_channels(&self) -> Vec<Arc<RotatingWriter>> {
        let mut channels = Vec::new();
        let default = self.default_channel();
        if default.rotates() {
            channels.push(default);
        }
        channels.extend(
            self.access
                .read()
                .values()
                .filter(|w| w.rotates())
                .cloned(),
        );
        channels
    }
}

/// Opens or creates `path` in append mode and makes it the destination
/// of the default leveled channel, replacing standard output. Starts the
/// rotation scheduler if it is not yet running.
pub fn set_default_log_file(path: impl AsRef<Path>) -> Result<(), LogError> {
    let writer = Arc::new(RotatingWriter::open(path)?);
    *REGISTRY.default.write() = writer;
    scheduler::ensure_started(scheduler::DEFAULT_SWEEP_INTERVAL)
}

/// Opens or creates `path` in append mode and registers it as the access
/// channel `name`. Registering an existing name replaces the previous
/// channel. Starts the rotation scheduler if it is not yet running.
pub fn set_access_log_file(
    name: impl Into<String>,
    path: impl AsRef<Path>,
) -> Result<(), LogError> {
    let writer = Arc::new(RotatingWriter::open(path)?);
    REGISTRY.access.write().insert(name.into(), writer);
    scheduler::ensure_started(scheduler::DEFAULT_SWEEP_INTERVAL)
}
