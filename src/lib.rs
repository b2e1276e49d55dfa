//! sfid: content identifiers (UUID v5 and digests) for strings, files and directory trees

pub mod engine;
pub mod error;
pub mod pipeline;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use types::*;

pub use engine::hashing::DigestAlgo;
pub use engine::output::OutputFormat;
pub use engine::resolver::{FileOpener, FsOpener, Item, Resolver};
pub use error::SfidError;
pub use pipeline::{CancelToken, PipelineSummary};

use crossbeam_channel::Sender;
use log::{debug, info};
use std::path::Path;
use std::sync::Arc;

use engine::tools::{InputKind, classify_input, ensure_dir_not_empty};

/// Result alias used by public sfid API
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Identifier generator for one configuration. Cheap to share; `process` may be called many
/// times.
pub struct Sfid {
    config: Config,
    resolver: Arc<Resolver>,
    cancel: CancelToken,
}

impl Sfid {
    pub fn new(config: Config) -> Self {
        let resolver = Arc::new(Resolver::new(&config));
        Self {
            config,
            resolver,
            cancel: CancelToken::new(),
        }
    }

    /// Read files through `opener` instead of the filesystem.
    pub fn with_opener(mut self, opener: Arc<dyn FileOpener>) -> Self {
        self.resolver = Arc::new(Resolver::with_opener(&self.config, opener));
        self
    }

    /// Share a cancellation token with the caller (e.g. a Ctrl+C handler).
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Handle for cancelling runs of this instance from another thread.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Identify `input` and send the results on `out`.
    ///
    /// `input` is a directory if it names one, a file if it names an existing regular file, and a
    /// literal string otherwise. Strings and files produce exactly one record. Directories
    /// stream one record per regular file, concurrently and unordered; drain the receiver from
    /// another thread (or use an unbounded channel).
    ///
    /// `out` is dropped before this returns, so the channel closes once the caller's own
    /// senders are gone. An existing empty directory fails with [`SfidError::EmptyInput`] before
    /// anything is sent.
    pub fn process(&self, input: &str, out: Sender<Output>) -> Result<()> {
        let config = &self.config;
        debug!(
            "{} CONFIG:{:#?}",
            env!("CARGO_PKG_NAME").to_uppercase(),
            config
        );

        match classify_input(input) {
            InputKind::Dir => {
                let root = Path::new(input);
                ensure_dir_not_empty(root)?;
                self.log_requested();
                info!(
                    "Traversing directory {} (recursive: {}, jobs: {})",
                    root.display(),
                    config.recursive,
                    config.worker_count()
                );
                let summary = pipeline::run_pipeline(
                    root,
                    config,
                    Arc::clone(&self.resolver),
                    out,
                    &self.cancel,
                )?;
                debug!(
                    "Processed {} files ({} skipped)",
                    summary.paths_sent, summary.skipped
                );
                Ok(())
            }
            InputKind::File => {
                self.log_requested();
                info!("Processing file");
                let output = self.resolver.resolve_file(Path::new(input))?;
                send_one(out, output)
            }
            InputKind::Text => {
                self.log_requested();
                info!("Processing a string");
                send_one(out, self.resolver.resolve_text(input))
            }
        }
    }

    fn log_requested(&self) {
        if self.config.with_identifier {
            info!("Generating UUID v5 (namespace: {})", self.config.namespace);
        }
        if self.config.with_digest {
            info!("Generating {} digest", self.config.digest_algo.name());
        }
    }
}

fn send_one(out: Sender<Output>, output: Output) -> Result<()> {
    out.send(output).map_err(|_| SfidError::SinkClosed)?;
    Ok(())
}

/// Single entry point: identify `input` under `config`, streaming results to `out`.
/// See [`Sfid::process`].
pub fn process(input: &str, config: &Config, out: Sender<Output>) -> Result<()> {
    Sfid::new(config.clone()).process(input, out)
}
