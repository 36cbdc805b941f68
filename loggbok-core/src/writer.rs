//! ## loggbok-core::writer
//! **Rotation-and-concurrency-safe channel writer**
//!
//! One mutex per channel guards the open handle and the date it was
//! opened for, together. Writes and rotations take the same lock, so a
//! line can never land half in the old file and half in the new one, and
//! two rotation triggers can never both rename the live file.

use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{Local, NaiveDate};
use parking_lot::Mutex;

use crate::error::LogError;

/// Date suffix appended to a rotated file, e.g. `access.log2016-07-05`.
const DATE_SUFFIX_FORMAT: &str = "%Y-%m-%d";

static WRITE_FAILURES: AtomicU64 = AtomicU64::new(0);

/// Number of log lines dropped because the underlying write failed.
/// Logging calls never surface errors to their callers; this counter is
/// the observable trace of lost lines.
pub fn write_failure_count() -> u64 {
    WRITE_FAILURES.load(Ordering::Relaxed)
}

enum Destination {
    Stdout,
    File(File),
}

struct Inner {
    dest: Destination,
    /// Calendar date the current handle was opened for. The rotated
    /// file's suffix always denotes the period it covers.
    opened_for: NaiveDate,
}

/// A channel's output: an append-mode file handle (or stdout, which is
/// never rotated) plus the date it was opened for, behind one mutex.
pub struct RotatingWriter {
    /// `None` means the writer is bound to standard output.
    path: Option<PathBuf>,
    inner: Mutex<Inner>,
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

impl RotatingWriter {
    /// A writer bound to standard output. Rotation checks are no-ops.
    pub fn stdout() -> Self {
        Self {
            path: None,
            inner: Mutex::new(Inner {
                dest: Destination::Stdout,
                opened_for: Local::now().date_naive(),
            }),
        }
    }

    /// Opens or creates `path` in append mode.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LogError> {
        let path = path.as_ref().to_owned();
        let file = open_append(&path).map_err(|source| LogError::ChannelOpen {
            path: path.clone(),
            source,
        })?;
        Ok(Self {
            path: Some(path),
            inner: Mutex::new(Inner {
                dest: Destination::File(file),
                opened_for: Local::now().date_naive(),
            }),
        })
    }

    /// Whether this writer is file-backed and therefore subject to the
    /// daily rotation sweep.
    pub fn rotates(&self) -> bool {
        self.path.is_some()
    }

    /// Writes `line` plus a trailing newline under the channel lock.
    ///
    /// Failures never propagate to the logging caller: the line is
    /// dropped, counted, and echoed best-effort to stderr.
    pub fn write_line(&self, line: &str) {
        let mut buf = Vec::with_capacity(line.len() + 1);
        buf.extend_from_slice(line.as_bytes());
        buf.push(b'\n');

        let mut inner = self.inner.lock();
        let result = match &mut inner.dest {
            Destination::Stdout => io::stdout().lock().write_all(&buf),
            Destination::File(file) => file.write_all(&buf),
        };
        drop(inner);

        if let Err(e) = result {
            WRITE_FAILURES.fetch_add(1, Ordering::Relaxed);
            let _ = writeln!(io::stderr().lock(), "loggbok: dropped log line: {e}");
        }
    }

    /// Rotates the file if `today` differs from the date the current
    /// handle was opened for. Returns `Ok(true)` when a rotation was
    /// performed, `Ok(false)` for the no-op case (including stdout).
    ///
    /// The date comparison happens under the same lock as the handle
    /// swap; a second trigger with the same `today` is a no-op rather
    /// than a double rotation.
    ///
    /// A failed rename is recovered: the original path is reopened (which
    /// then appends to the pre-rotation content) and the error is
    /// returned for the caller to report through the default channel. A
    /// failed reopen keeps the old handle and the old date, so the next
    /// sweep retries.
    pub fn rotate_if_date_changed(&self, today: NaiveDate) -> Result<bool, LogError> {
        let Some(path) = &self.path else {
            return Ok(false);
        };

        let mut inner = self.inner.lock();
        if inner.opened_for == today {
            return Ok(false);
        }

        let suffix = inner.opened_for.format(DATE_SUFFIX_FORMAT).to_string();
        let mut rotated = OsString::from(path.as_os_str());
        rotated.push(&suffix);
        let rotated = PathBuf::from(rotated);

        let rename_result = std::fs::rename(path, &rotated);

        // Reopen unconditionally. If the rename failed this reopens the
        // still-present original file; appending to pre-rotation content
        // is the accepted degraded mode.
        match open_append(path) {
            Ok(file) => {
                inner.dest = Destination::File(file);
                inner.opened_for = today;
            }
            Err(source) => {
                // Old handle stays valid and the stored date is kept, so
                // the next rotation trigger retries from scratch.
                return Err(LogError::ChannelOpen {
                    path: path.clone(),
                    source,
                });
            }
        }

        match rename_result {
            Ok(()) => Ok(true),
            Err(source) => Err(LogError::RotationRename {
                path: path.clone(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn read_lines(path: &Path) -> Vec<String> {
        std::fs::read_to_string(path)
            .unwrap_or_default()
            .lines()
            .map(str::to_owned)
            .collect()
    }

    fn rotated_path(path: &Path, date: NaiveDate) -> PathBuf {
        let mut os = OsString::from(path.as_os_str());
        os.push(date.format(DATE_SUFFIX_FORMAT).to_string());
        PathBuf::from(os)
    }

    #[test]
    fn test_stdout_never_rotates() {
        let writer = RotatingWriter::stdout();
        let tomorrow = Local::now().date_naive().succ_opt().unwrap();
        assert!(!writer.rotate_if_date_changed(tomorrow).unwrap());
    }

    #[test]
    fn test_open_failure_is_channel_open() {
        let dir = tempfile::tempdir().unwrap();
        let err = RotatingWriter::open(dir.path().join("missing").join("a.log"))
            .err()
            .unwrap();
        assert!(matches!(err, LogError::ChannelOpen { .. }));
    }

    #[test]
    fn test_rotation_splits_lines_at_boundary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("access.log");
        let writer = RotatingWriter::open(&path).unwrap();

        writer.write_line("before-1");
        writer.write_line("before-2");

        let opened_for = Local::now().date_naive();
        let tomorrow = opened_for.succ_opt().unwrap();
        assert!(writer.rotate_if_date_changed(tomorrow).unwrap());

        writer.write_line("after-1");

        assert_eq!(
            read_lines(&rotated_path(&path, opened_for)),
            vec!["before-1", "before-2"]
        );
        assert_eq!(read_lines(&path), vec!["after-1"]);
    }

    #[test]
    fn test_rotation_is_idempotent_for_same_day() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        let writer = RotatingWriter::open(&path).unwrap();
        writer.write_line("one");

        let tomorrow = Local::now().date_naive().succ_opt().unwrap();
        assert!(writer.rotate_if_date_changed(tomorrow).unwrap());
        assert!(!writer.rotate_if_date_changed(tomorrow).unwrap());

        // Exactly one renamed file, and the live file was not renamed a
        // second time.
        let rotated: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .filter(|name| name != "app.log")
            .collect();
        assert_eq!(rotated.len(), 1);
    }

    #[test]
    fn test_no_rotation_when_date_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        let writer = RotatingWriter::open(&path).unwrap();
        writer.write_line("kept");

        assert!(!writer.rotate_if_date_changed(Local::now().date_naive()).unwrap());
        assert_eq!(read_lines(&path), vec!["kept"]);
    }

    #[test]
    fn test_rename_failure_degrades_but_keeps_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stuck.log");
        let writer = RotatingWriter::open(&path).unwrap();
        writer.write_line("pre-rotation");

        let opened_for = Local::now().date_naive();
        let tomorrow = opened_for.succ_opt().unwrap();
        // A directory squatting on the rename target makes the rename
        // fail while leaving the live file in place.
        std::fs::create_dir(rotated_path(&path, opened_for)).unwrap();

        let err = writer.rotate_if_date_changed(tomorrow).err().unwrap();
        assert!(matches!(err, LogError::RotationRename { .. }));

        // Degraded mode: the reopened handle appends to the
        // pre-rotation content, and a repeat same-day trigger is a
        // no-op rather than a second rename attempt.
        writer.write_line("post-rotation");
        assert_eq!(read_lines(&path), vec!["pre-rotation", "post-rotation"]);
        assert!(!writer.rotate_if_date_changed(tomorrow).unwrap());
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn test_failed_write_is_counted_not_propagated() {
        // /dev/full accepts the open but fails every write with ENOSPC.
        let writer = RotatingWriter::open("/dev/full").unwrap();
        let before = write_failure_count();
        writer.write_line("lost");
        assert!(write_failure_count() > before);
    }

    #[test]
    fn test_concurrent_writers_with_mid_run_rotation() {
        const WRITERS: usize = 8;
        const LINES: usize = 200;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("busy.log");
        let writer = Arc::new(RotatingWriter::open(&path).unwrap());
        let opened_for = Local::now().date_naive();
        let tomorrow = opened_for.succ_opt().unwrap();

        std::thread::scope(|scope| {
            for w in 0..WRITERS {
                let writer = Arc::clone(&writer);
                scope.spawn(move || {
                    for i in 0..LINES {
                        writer.write_line(&format!("writer-{w}-line-{i}"));
                    }
                });
            }
            let writer = Arc::clone(&writer);
            scope.spawn(move || {
                std::thread::yield_now();
                writer.rotate_if_date_changed(tomorrow).unwrap();
            });
        });

        let mut lines = read_lines(&rotated_path(&path, opened_for));
        lines.extend(read_lines(&path));
        assert_eq!(lines.len(), WRITERS * LINES);
        for line in &lines {
            // No torn or interleaved lines, regardless of where the
            // rotation landed.
            assert!(
                line.starts_with("writer-") && line.contains("-line-"),
                "torn line: {line:?}"
            );
        }
    }
}
