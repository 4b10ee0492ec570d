use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageProbeError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("storage directory does not exist: {}", .0.display())]
    MissingDirectory(PathBuf),
    #[error("filesystem statistics are not available on this platform")]
    Unsupported,
    #[error("storage probe was cancelled")]
    Cancelled,
    #[error("storage probe worker panicked")]
    Panicked,
}

type ProbeResult = Result<u64, StorageProbeError>;

enum ProbeState {
    Running {
        handle: JoinHandle<ProbeResult>,
        cancelled: Arc<AtomicBool>,
    },
    Done(u64),
    Cancelled,
}

/// A one-shot background probe for the total capacity of a storage volume.
///
/// The worker runs once. Its result is read at most once and cached; a failed probe
/// reports 0 bytes and is not retried. Cancelling (e.g. when the owning view detaches)
/// discards the result.
pub struct StorageProbe {
    state: ProbeState,
}

impl core::fmt::Debug for StorageProbe {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let state = match &self.state {
            ProbeState::Running { .. } => "running",
            ProbeState::Done(_) => "done",
            ProbeState::Cancelled => "cancelled",
        };
        f.debug_struct("StorageProbe").field("state", &state).finish()
    }
}

impl StorageProbe {
    /// Spawns a worker that evaluates `probe` once.
    pub fn spawn<F>(probe: F) -> Self
    where
        F: FnOnce() -> ProbeResult + Send + 'static,
    {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);
        let spawned = thread::Builder::new()
            .name("feedsnap-storage-probe".into())
            .spawn(move || {
                if flag.load(Ordering::Acquire) {
                    return Err(StorageProbeError::Cancelled);
                }
                probe()
            });
        let state = match spawned {
            Ok(handle) => ProbeState::Running { handle, cancelled },
            Err(err) => {
                awarn!(error = %err, "failed to spawn storage probe");
                ProbeState::Done(0)
            }
        };
        Self { state }
    }

    /// Probes the volume holding `dir`, creating the directory first if it is missing.
    pub fn for_directory(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self::spawn(move || filesystem_total_bytes(&dir))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self.state, ProbeState::Cancelled)
    }

    /// Returns true once the worker has finished (or the probe was cancelled).
    pub fn is_finished(&self) -> bool {
        match &self.state {
            ProbeState::Running { handle, .. } => handle.is_finished(),
            _ => true,
        }
    }

    /// Discards the pending result. A running worker is left to finish on its own.
    pub fn cancel(&mut self) {
        if let ProbeState::Running { cancelled, .. } = &self.state {
            cancelled.store(true, Ordering::Release);
            atrace!("storage probe cancelled");
        }
        self.state = ProbeState::Cancelled;
    }

    /// Total bytes of the probed volume, waiting for the worker on the first call.
    ///
    /// Returns 0 when the probe failed or was cancelled.
    pub fn total_bytes(&mut self) -> u64 {
        let state = core::mem::replace(&mut self.state, ProbeState::Cancelled);
        let bytes = match state {
            ProbeState::Done(bytes) => bytes,
            ProbeState::Cancelled => return 0,
            ProbeState::Running { handle, .. } => {
                let result = handle.join().unwrap_or(Err(StorageProbeError::Panicked));
                match result {
                    Ok(bytes) => bytes,
                    Err(err) => {
                        awarn!(error = %err, "storage probe failed");
                        0
                    }
                }
            }
        };
        self.state = ProbeState::Done(bytes);
        bytes
    }
}

impl Drop for StorageProbe {
    fn drop(&mut self) {
        if let ProbeState::Running { cancelled, .. } = &self.state {
            cancelled.store(true, Ordering::Release);
        }
    }
}

/// Total capacity, in bytes, of the filesystem holding `dir`.
///
/// A missing directory is created first; if that fails the probe reports
/// [`StorageProbeError::MissingDirectory`].
pub fn filesystem_total_bytes(dir: &Path) -> ProbeResult {
    if !dir.exists() {
        if let Err(err) = std::fs::create_dir_all(dir) {
            awarn!(dir = %dir.display(), error = %err, "could not create storage directory");
        }
    }
    if !dir.is_dir() {
        return Err(StorageProbeError::MissingDirectory(dir.to_path_buf()));
    }
    volume_total_bytes(dir)
}

#[cfg(unix)]
fn volume_total_bytes(dir: &Path) -> ProbeResult {
    let stat = nix::sys::statvfs::statvfs(dir).map_err(io::Error::from)?;
    let blocks = stat.blocks() as u64;
    let fragment = stat.fragment_size() as u64;
    Ok(blocks.saturating_mul(fragment))
}

#[cfg(not(unix))]
fn volume_total_bytes(_dir: &Path) -> ProbeResult {
    Err(StorageProbeError::Unsupported)
}

/// Used/total byte counts for a storage summary line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StorageSummary {
    pub used_bytes: u64,
    pub total_bytes: u64,
}

impl StorageSummary {
    pub fn new(used_bytes: u64, total_bytes: u64) -> Self {
        Self {
            used_bytes,
            total_bytes,
        }
    }

    /// Percentage of the volume in use, or 0 when the total is unknown.
    pub fn percent_used(&self) -> u32 {
        if self.total_bytes == 0 {
            return 0;
        }
        let pct = self.used_bytes as u128 * 100 / self.total_bytes as u128;
        pct.min(100) as u32
    }
}
