use anyhow::Result;
use crossbeam_channel::Sender;
use log::debug;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use crate::engine::resolver::Resolver;
use crate::error::SfidError;
use crate::pipeline;
use crate::pipeline::context::{CancelToken, FirstError, PipelineContext, SkippedPaths, WalkOpts};
use crate::pipeline::workers::WorkerShared;
use crate::{Config, Output};

/// What a completed directory run did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PipelineSummary {
    /// Paths the walk handed to the workers.
    pub paths_sent: usize,
    /// Entries skipped because of non-fatal walk errors.
    pub skipped: usize,
}

/// Run the walk + hashing pipeline over `root` and block until it has fully stopped.
///
/// Walk → path queue → `config.worker_count()` workers → `out_tx`. Results are streamed as they
/// are ready, in no particular order; the caller must drain the receiving side concurrently.
/// Returns only after the walk thread and every worker have been joined; by then every clone of
/// `out_tx` is dropped and the channel is closed. The first failure cancels the run and is
/// the error returned. `cancel` is only observed, never tripped, so it can be reused.
pub fn run_pipeline(
    root: &Path,
    config: &Config,
    resolver: Arc<Resolver>,
    out_tx: Sender<Output>,
    cancel: &CancelToken,
) -> Result<PipelineSummary> {
    let num_workers = config.worker_count();
    debug!("Hashing with {} workers", num_workers);

    let run_cancel = cancel.child();
    let first_error = FirstError::new(run_cancel.clone());
    let skipped_paths: SkippedPaths = Arc::new(Mutex::new(Vec::new()));
    let channels = pipeline::create_pipeline_channels(num_workers);

    let ctx = PipelineContext {
        root: root.to_path_buf(),
        walk: WalkOpts {
            recursive: config.recursive,
            follow_links: config.follow_links,
        },
        cancel: run_cancel.clone(),
        first_error: first_error.clone(),
        skipped_paths: Arc::clone(&skipped_paths),
    };
    let walk_handle = pipeline::spawn_walk_thread(channels.path_tx, ctx);

    let shared = WorkerShared {
        resolver,
        cancel: run_cancel.clone(),
        first_error: first_error.clone(),
    };
    let worker_handles =
        pipeline::spawn_hash_workers(channels.path_rx, &out_tx, &shared, num_workers);

    // Workers now hold the only senders; the channel closes when the last one exits.
    drop(out_tx);

    let paths_sent = shutdown_pipeline_handles(walk_handle, worker_handles, &first_error);
    debug!("walk sent {} paths, all workers joined", paths_sent);

    let skipped = pipeline::check_for_first_error_or_skipped_paths(
        &first_error,
        &run_cancel,
        &skipped_paths,
    )?;
    Ok(PipelineSummary {
        paths_sent,
        skipped,
    })
}

/// Join the walk thread and every worker. A panic in any of them is recorded as the run's error
/// rather than propagated. Returns the walk's path count.
pub fn shutdown_pipeline_handles(
    walk_handle: JoinHandle<usize>,
    worker_handles: Vec<JoinHandle<()>>,
    first_error: &FirstError,
) -> usize {
    let paths_sent = walk_handle.join().unwrap_or_else(|_| {
        first_error.record(SfidError::WorkerPanicked { role: "walk" }.into());
        0
    });
    for h in worker_handles {
        if h.join().is_err() {
            first_error.record(SfidError::WorkerPanicked { role: "worker" }.into());
        }
    }
    paths_sent
}
