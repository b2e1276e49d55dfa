//! Application configuration constants.
//! Tuning, defaults and thresholds in one place.

use std::sync::OnceLock;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    config_filename: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                config_filename: format!(".{pkg}.toml"),
            }
        })
    }

    /// Name of the optional settings file looked up in the working directory (e.g. `.sfid.toml`).
    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }
}

// ---- Namespaces ----

/// Well-known namespace seeds for UUID v5 generation.
pub struct Namespaces;

impl Namespaces {
    /// Used when nothing else is configured.
    pub const DEFAULT: &'static str = "speciesfilegroup.org";
    pub const GLOBALNAMES: &'static str = "globalnames.org";
    pub const TAXONWORKS: &'static str = "taxonworks.org";
}

// ---- Worker threads ----

/// Thread limits for the hashing pool.
/// Use [`WorkerThreadLimits::current()`] to fill `all_threads` from rayon; the rest are const.
#[derive(Clone, Copy, Debug)]
pub struct WorkerThreadLimits {
    /// Available threads (from rayon); set by [`WorkerThreadLimits::current()`].
    pub all_threads: usize,
    /// Never go below this many workers.
    pub floor: usize,
}

impl Default for WorkerThreadLimits {
    fn default() -> Self {
        Self {
            all_threads: 0, // use current() to set from rayon
            floor: Self::FLOOR_THREADS,
        }
    }
}

impl WorkerThreadLimits {
    pub const FLOOR_THREADS: usize = 1;

    /// Build limits with `all_threads` set from `rayon::current_num_threads()`.
    pub fn current() -> Self {
        Self {
            all_threads: rayon::current_num_threads(),
            ..Self::default()
        }
    }
}

// ---- Hashing ----

/// Hashing buffer sizes.
pub struct HashingConsts;

impl HashingConsts {
    /// Chunk size for streaming file contents into the hashers (bytes). 64 KiB.
    pub const HASH_READ_CHUNK_SIZE: usize = 64 * 1024;
}

// ---- Output ----

/// Display limits for result records.
pub struct DisplayConsts;

impl DisplayConsts {
    /// STRING sources longer than this many characters are truncated when printed.
    pub const SOURCE_DISPLAY_LIMIT: usize = 100;
    /// Appended to a truncated source.
    pub const ELLIPSIS: &'static str = "...";
}

// ---- Channels ----

/// Queue capacities for the walk -> workers -> sink pipeline.
pub struct ChannelCaps;

impl ChannelCaps {
    /// Path queue slots per worker. Keeps the walk slightly ahead of the pool without
    /// buffering a whole tree in memory.
    pub const PATH_QUEUE_PER_WORKER: usize = 4;
    /// Output channel capacity used by the CLI printer.
    pub const OUTPUT: usize = 256;
}
