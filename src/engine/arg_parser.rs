use clap::Parser;
use std::path::PathBuf;

use crate::engine::hashing::DigestAlgo;
use crate::engine::output::OutputFormat;

/// Content identifiers for a string, a file, or every file in a directory.
#[derive(Clone, Parser)]
#[command(name = "sfid", version)]
#[command(
    about = "Generate UUID v5 identifiers and digests for a string, a file, or each file of a directory."
)]
pub struct Cli {
    /// A directory, a file, or (if it names neither) a literal string.
    #[arg(value_name = "INPUT")]
    pub input: String,

    /// Include the UUID v5 of the content.
    #[arg(long, short = 'u', num_args = 0..=1, require_equals = true, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub uuid: Option<bool>,

    /// Include the content digest.
    #[arg(long, short = 's', num_args = 0..=1, require_equals = true, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub digest: Option<bool>,

    /// Digest algorithm. Default: md5.
    #[arg(long, short = 'a', value_enum)]
    pub algorithm: Option<DigestAlgo>,

    /// Namespace seed for UUID v5. Default: speciesfilegroup.org.
    #[arg(long, short = 'n', conflicts_with_all = ["gn_namespace", "tw_namespace"])]
    pub namespace: Option<String>,

    /// Use the globalnames.org namespace for UUID v5.
    #[arg(long, short = 'g', conflicts_with = "tw_namespace")]
    pub gn_namespace: bool,

    /// Use the taxonworks.org namespace for UUID v5.
    #[arg(long, short = 't')]
    pub tw_namespace: bool,

    /// Traverse a directory recursively.
    #[arg(long, short = 'r', num_args = 0..=1, require_equals = true, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub recursive: Option<bool>,

    /// Follow symbolic links while walking.
    #[arg(long, short = 'f', num_args = 0..=1, require_equals = true, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub follow_links: Option<bool>,

    /// Number of hashing workers. Zero or negative: available parallelism.
    #[arg(long = "jobs-number", short = 'j', allow_negative_numbers = true)]
    pub jobs_number: Option<i64>,

    /// Output format.
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Show a file counter on stderr.
    #[arg(long, short = 'p', num_args = 0..=1, require_equals = true, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub progress: Option<bool>,

    /// Verbose output.
    #[arg(long, short = 'v', num_args = 0..=1, require_equals = true, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub verbose: Option<bool>,

    /// Settings file. Default: `.sfid.toml` in the working directory, if present.
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,
}
