//! Public and internal types for the sfid API and pipeline.

use std::path::PathBuf;

use serde::Serialize;
use uuid::Uuid;

use crate::engine::hashing::DigestAlgo;
use crate::engine::output::OutputFormat;
use crate::utils::config::{Namespaces, WorkerThreadLimits};
use crate::utils::fd_limit::cap_workers_by_fd_limit;

/// Provenance of a processed item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Kind {
    String,
    File,
}

/// One identified input unit: a literal string or a file.
///
/// `digest` and `identifier` are independent; a record with neither is still valid and
/// carries only its `source`. Formatting lives in [`crate::engine::output`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Output {
    pub kind: Kind,
    /// The original string, or the file path as discovered (never truncated here).
    pub source: String,
    /// Content digest under the configured [`DigestAlgo`].
    pub digest: Option<Vec<u8>>,
    /// UUID v5 under the run's namespace.
    pub identifier: Option<Uuid>,
}

impl Output {
    /// Lowercase hex of the digest, or an empty string when absent.
    pub fn digest_hex(&self) -> String {
        self.digest.as_deref().map(hex::encode).unwrap_or_default()
    }

    /// Hyphenated UUID, or an empty string when absent.
    pub fn identifier_string(&self) -> String {
        self.identifier.map(|u| u.to_string()).unwrap_or_default()
    }
}

/// Options for one run. Built once and shared read-only by every worker.
#[derive(Clone, Debug)]
pub struct Config {
    /// Include the UUID v5 in results.
    pub with_identifier: bool,
    /// Include the content digest in results.
    pub with_digest: bool,
    /// Algorithm of the reported digest. The identifier of file content is always anchored on
    /// SHA-1, independent of this.
    pub digest_algo: DigestAlgo,
    /// Seed hashed (under the DNS namespace) into the namespace of every identifier.
    pub namespace: String,
    /// Recurse into subdirectories when the input is a directory.
    pub recursive: bool,
    /// Follow symbolic links while walking.
    pub follow_links: bool,
    /// Worker count. `None` or `Some(0)` means available parallelism.
    pub jobs: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            with_identifier: false,
            with_digest: false,
            digest_algo: DigestAlgo::default(),
            namespace: Namespaces::DEFAULT.to_string(),
            recursive: false,
            follow_links: false,
            jobs: None,
        }
    }
}

impl Config {
    /// Effective worker count: the configured value when positive, used as is. Otherwise the
    /// host's available parallelism, capped by the file descriptor budget.
    pub fn worker_count(&self) -> usize {
        match self.jobs {
            Some(n) if n > 0 => n,
            _ => {
                let limits = WorkerThreadLimits::current();
                cap_workers_by_fd_limit(limits.all_threads.max(limits.floor))
            }
        }
    }
}

/// Full options (CLI). Use [`Config`] for lib.
#[derive(Clone, Debug, Default)]
pub struct Opts {
    pub config: Config,
    /// How records are printed.
    pub format: OutputFormat,
    /// Show a progress counter on stderr.
    pub progress: bool,
    /// Debug logging.
    pub verbose: bool,
    /// Settings file. When None, `.sfid.toml` in the working directory is tried.
    pub config_path: Option<PathBuf>,
}
