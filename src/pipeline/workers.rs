use crossbeam_channel::{Receiver, Sender};
use log::debug;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::Output;
use crate::engine::resolver::Resolver;
use crate::error::SfidError;

use super::context::{CancelToken, FirstError};

/// Shared handles every hashing worker needs.
#[derive(Clone)]
pub struct WorkerShared {
    pub resolver: Arc<Resolver>,
    pub cancel: CancelToken,
    pub first_error: FirstError,
}

/// Single hashing worker: read paths from path_rx, resolve, send on out_tx.
/// On the first failure (own or observed) stop resolving and discard whatever is still queued
/// so the walk never waits on a full queue.
fn hash_worker_loop(
    id: usize,
    path_rx: Receiver<PathBuf>,
    out_tx: Sender<Output>,
    shared: WorkerShared,
) {
    let mut done = 0_usize;
    while let Ok(path) = path_rx.recv() {
        if shared.cancel.is_cancelled() {
            break;
        }
        match shared.resolver.resolve_file(&path) {
            Ok(output) => {
                if out_tx.send(output).is_err() {
                    shared.first_error.record(SfidError::SinkClosed.into());
                    break;
                }
                done += 1;
            }
            Err(err) => {
                shared.first_error.record(err.into());
                break;
            }
        }
    }
    let discarded = path_rx.try_iter().count();
    debug!(
        "worker {}: exiting after {} files ({} queued paths discarded)",
        id, done, discarded
    );
    drop(out_tx);
}

/// Spawn `num_workers` hashing workers. Each gets its own clone of `out_tx`; the caller must drop
/// its sender afterwards so the output channel closes when the last worker exits.
pub fn spawn_hash_workers(
    path_rx: Receiver<PathBuf>,
    out_tx: &Sender<Output>,
    shared: &WorkerShared,
    num_workers: usize,
) -> Vec<JoinHandle<()>> {
    (0..num_workers)
        .map(|id| {
            let path_rx = path_rx.clone();
            let out_tx = out_tx.clone();
            let shared = shared.clone();
            thread::spawn(move || hash_worker_loop(id, path_rx, out_tx, shared))
        })
        .collect()
}
