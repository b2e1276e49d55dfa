//! Engine module: hashing, single-item resolution, output formatting and the CLI

pub mod arg_parser;
pub mod cli;
pub mod hashing;
pub mod output;
pub mod progress;
pub mod resolver;
pub mod tools;

// Re-export commonly used functions
pub use arg_parser::Cli;
pub use cli::{build_opts, handle_run};
pub use hashing::{DigestAlgo, DigestRequest, Digests, digest_bytes, digest_reader, namespace_for};
pub use output::{OutputFormat, display_source, format_output, write_outputs};
pub use resolver::{FileOpener, FsOpener, Item, Resolver};
pub use tools::{InputKind, classify_input, ensure_dir_not_empty, truncate_chars};
