//! Background world file reader.

use std::path::PathBuf;
use std::thread;

use blockyard_core::{Error, Result};
use blockyard_world::{exchange, Block};
use crossbeam::channel::{self, Receiver, TryRecvError};
use tracing::{debug, warn};

/// A finished read, ready to be applied on the session thread.
#[derive(Debug)]
pub struct LoadResult {
    pub path: PathBuf,
    pub blocks: Result<Vec<Block>>,
}

/// One-shot reader threads, at most one outstanding.
///
/// Starting a new load drops the receiver of the previous one; its worker
/// finishes on its own and the stale result is discarded.
#[derive(Debug, Default)]
pub struct WorldLoader {
    pending: Option<PendingLoad>,
}

#[derive(Debug)]
struct PendingLoad {
    path: PathBuf,
    result_rx: Receiver<LoadResult>,
}

impl PendingLoad {
    /// The result reported when the worker vanished without sending.
    fn exited(self) -> LoadResult {
        warn!(path = %self.path.display(), "world loader exited without a result");
        LoadResult {
            path: self.path,
            blocks: Err(Error::InvalidData("world loader thread exited".into())),
        }
    }
}

impl WorldLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` while a load is outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Read and validate `path` on a worker thread.
    pub fn start(&mut self, path: PathBuf, spacing: i32) -> Result<()> {
        if let Some(stale) = self.pending.take() {
            debug!(path = %stale.path.display(), "replacing outstanding world load");
        }

        let (result_tx, result_rx) = channel::bounded::<LoadResult>(1);
        let worker_path = path.clone();
        thread::Builder::new()
            .name("world-loader".to_string())
            .spawn(move || {
                let blocks = exchange::load_from_path(&worker_path, spacing);
                // Receiver dropped means the load was superseded.
                let _ = result_tx.send(LoadResult {
                    path: worker_path,
                    blocks,
                });
            })?;

        self.pending = Some(PendingLoad { path, result_rx });
        Ok(())
    }

    /// Take the finished load, if any (non-blocking).
    pub fn try_take(&mut self) -> Option<LoadResult> {
        let received = self.pending.as_ref()?.result_rx.try_recv();
        match received {
            Ok(result) => {
                self.pending = None;
                Some(result)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => self.pending.take().map(PendingLoad::exited),
        }
    }

    /// Block until the outstanding load finishes.
    pub fn wait(&mut self) -> Option<LoadResult> {
        let pending = self.pending.take()?;
        let received = pending.result_rx.recv();
        match received {
            Ok(result) => Some(result),
            Err(_) => Some(pending.exited()),
        }
    }
}
