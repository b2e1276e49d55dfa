//! Pipeline context: cancellation, the first-error latch, and the shared state handed to the
//! walk thread and the workers.

use crossbeam_channel::{Receiver, Sender, bounded};
use log::debug;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::utils::config::ChannelCaps;

/// Cooperative cancellation flag shared by every participant. Checked at loop boundaries.
///
/// A child token observes cancellation of every ancestor, but cancelling the child leaves the
/// ancestors untouched; each run works on a child of the caller's token.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
    parent: Option<Arc<CancelToken>>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn child(&self) -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
            parent: Some(Arc::new(self.clone())),
        }
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
            || self
                .parent
                .as_ref()
                .is_some_and(|p| p.is_cancelled())
    }
}

/// First-error-wins latch. Recording an error also cancels the run.
#[derive(Clone)]
pub struct FirstError {
    slot: Arc<Mutex<Option<anyhow::Error>>>,
    cancel: CancelToken,
}

impl FirstError {
    pub fn new(cancel: CancelToken) -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
            cancel,
        }
    }

    /// Keep `err` if no error was recorded yet; later errors are logged and dropped.
    /// Returns true when `err` was the one kept.
    pub fn record(&self, err: anyhow::Error) -> bool {
        let kept = {
            let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
            if slot.is_none() {
                *slot = Some(err);
                true
            } else {
                debug!("Dropping error after the first: {:#}", err);
                false
            }
        };
        self.cancel.cancel();
        kept
    }

    pub fn is_set(&self) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn take(&self) -> Option<anyhow::Error> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

/// Paths skipped during the walk, with the reason.
pub type SkippedPaths = Arc<Mutex<Vec<(PathBuf, String)>>>;

/// Walk settings.
#[derive(Clone, Copy, Debug, Default)]
pub struct WalkOpts {
    pub recursive: bool,
    pub follow_links: bool,
}

/// Shared context for the walk thread: root, walk settings, cancellation and error/skip state.
pub struct PipelineContext {
    pub root: PathBuf,
    pub walk: WalkOpts,
    pub cancel: CancelToken,
    pub first_error: FirstError,
    pub skipped_paths: SkippedPaths,
}

/// Path queue between the walk and the workers.
pub struct PipelineChannels {
    pub path_tx: Sender<PathBuf>,
    pub path_rx: Receiver<PathBuf>,
}

/// Bounded path queue sized to the worker count, so the walk stays just ahead of the pool.
pub fn create_pipeline_channels(num_workers: usize) -> PipelineChannels {
    let cap = num_workers.max(1) * ChannelCaps::PATH_QUEUE_PER_WORKER;
    let (path_tx, path_rx) = bounded::<PathBuf>(cap);
    PipelineChannels { path_tx, path_rx }
}
