//! Directory pipeline: context, walk loop, hashing workers, error handling.

pub mod context;
pub mod error_handler;
pub mod orchestrator;
pub mod walk;
pub mod workers;

pub use context::{
    CancelToken, FirstError, PipelineChannels, PipelineContext, SkippedPaths, WalkOpts,
    create_pipeline_channels,
};
pub use error_handler::check_for_first_error_or_skipped_paths;
pub use orchestrator::{PipelineSummary, run_pipeline, shutdown_pipeline_handles};
pub use walk::{
    WalkOutcome, enumerate, run_walk_loop, spawn_walk_thread, to_outcome_read_dir,
    to_outcome_walkdir,
};
pub use workers::{WorkerShared, spawn_hash_workers};
