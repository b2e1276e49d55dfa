//! Typed failures surfaced by [`crate::process`].
//!
//! The public API returns [`anyhow::Error`]; these values travel inside it and can be
//! recovered with `err.downcast_ref::<SfidError>()`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SfidError {
    /// The input is an existing directory with no entries.
    #[error("empty directory: '{}'", path.display())]
    EmptyInput { path: PathBuf },

    /// The directory given as input could not be listed.
    #[error("cannot read directory '{}': {source}", path.display())]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file could not be opened or failed mid-read.
    #[error("cannot read file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The receiving side of the output channel was dropped.
    #[error("output receiver closed before all results were delivered")]
    SinkClosed,

    /// Cancellation was requested from outside the pipeline.
    #[error("processing cancelled")]
    Cancelled,

    #[error("{role} thread panicked")]
    WorkerPanicked { role: &'static str },
}

impl SfidError {
    /// Lift an I/O failure on `path` into a [`SfidError::Read`].
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SfidError::Read {
            path: path.into(),
            source,
        }
    }
}
