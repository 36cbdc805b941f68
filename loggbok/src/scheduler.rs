//! Background rotation sweep.
//!
//! Rotation is purely scheduler-driven: the write path never checks the
//! date. One thread per process wakes on a fixed interval, computes
//! today's date once, and asks every file-backed channel to rotate. Each
//! check takes the same per-channel mutex as the write path, so a sweep
//! racing a write (or a second sweep) cannot rotate twice or tear a
//! line.

use std::time::Duration;

use chrono::{Local, NaiveDate};
use crossbeam_channel::{bounded, select, tick, Sender};
use once_cell::sync::OnceCell;

use loggbok_core::LogError;

use crate::dispatch;
use crate::registry::REGISTRY;

/// Date changes are only interesting once a day; a minute-order sweep
/// keeps the worst-case misfiled window short without measurable cost.
pub(crate) const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

static SCHEDULER: OnceCell<Sender<()>> = OnceCell::new();

/// Starts the sweep thread on first call; later calls are no-ops and the
/// initially chosen interval stays in effect.
pub(crate) fn ensure_started(interval: Duration) -> Result<(), LogError> {
    SCHEDULER.get_or_try_init(|| {
        let (stop_tx, stop_rx) = bounded::<()>(1);
        let ticker = tick(interval);
        std::thread::Builder::new()
            .name("loggbok-rotation".into())
            .spawn(move || loop {
                select! {
                    recv(ticker) -> _ => sweep_at(Local::now().date_naive()),
                    recv(stop_rx) -> _ => break,
                }
            })?;
        Ok::<_, std::io::Error>(stop_tx)
    })?;
    Ok(())
}

/// One rotation pass over every file-backed channel. Rename and reopen
/// failures are reported through the default channel and the pass
/// continues; a degraded channel keeps accepting writes.
pub(crate) fn sweep_at(today: NaiveDate) {
    for channel in REGISTRY.rotating_channels() {
        if let Err(e) = channel.rotate_if_date_changed(today) {
            dispatch::report_internal_error(&e);
        }
    }
}

/// Stops the background sweep thread. Channels stay usable; only the
/// periodic rotation check ends. Intended for embedders with a graceful
/// shutdown phase — without it the sweep simply runs for the process
/// lifetime.
pub fn shutdown_rotation() {
    if let Some(stop) = SCHEDULER.get() {
        let _ = stop.try_send(());
    }
}
