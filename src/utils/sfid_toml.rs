//! Load `.sfid.toml` settings (CLI only). Lib does not use this; library callers build a
//! [`Config`](crate::Config) directly.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::engine::hashing::DigestAlgo;
use crate::engine::output::OutputFormat;
use crate::utils::config::PackagePaths;
use crate::Opts;

#[derive(Debug, Default, Deserialize)]
pub struct SfidToml {
    #[serde(default)]
    settings: SettingsSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsSection {
    uuid: Option<bool>,
    digest: Option<bool>,
    algorithm: Option<DigestAlgo>,
    namespace: Option<String>,
    recursive: Option<bool>,
    follow_links: Option<bool>,
    jobs: Option<i64>,
    format: Option<OutputFormat>,
    progress: Option<bool>,
    verbose: Option<bool>,
}

/// Default settings file location: `.sfid.toml` in the working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from(PackagePaths::get().config_filename())
}

/// Parse settings from a TOML string.
pub fn parse_sfid_toml(s: &str) -> Result<SfidToml> {
    toml::from_str(s).context("parse settings")
}

/// Load settings from `path`. A missing file is `Ok(None)` unless `required`; a file that
/// exists but does not parse is always an error.
pub fn load_sfid_toml(path: &Path, required: bool) -> Result<Option<SfidToml>> {
    if !required && !path.exists() {
        return Ok(None);
    }
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("read settings file {}", path.display()))?;
    let parsed =
        parse_sfid_toml(&s).with_context(|| format!("settings file {}", path.display()))?;
    Ok(Some(parsed))
}

/// Overwrite opts field from file when present.
macro_rules! apply_file_opt {
    ($idx:expr, $opts:expr, $idx_field:ident => $($opts_field:ident).+) => {
        if let Some(v) = $idx.$idx_field.clone() {
            $opts.$($opts_field).+ = v;
        }
    };
}

/// Apply file settings to opts (only fields present in the file). Call before applying CLI.
pub fn apply_file_to_opts(file: &SfidToml, opts: &mut Opts) {
    let s = &file.settings;
    apply_file_opt!(s, opts, uuid => config.with_identifier);
    apply_file_opt!(s, opts, digest => config.with_digest);
    apply_file_opt!(s, opts, algorithm => config.digest_algo);
    apply_file_opt!(s, opts, namespace => config.namespace);
    apply_file_opt!(s, opts, recursive => config.recursive);
    apply_file_opt!(s, opts, follow_links => config.follow_links);
    if let Some(n) = s.jobs {
        opts.config.jobs = positive_jobs(n);
    }
    apply_file_opt!(s, opts, format => format);
    apply_file_opt!(s, opts, progress => progress);
    apply_file_opt!(s, opts, verbose => verbose);
}

/// Worker count from a signed setting: zero or negative means "use the default".
pub fn positive_jobs(n: i64) -> Option<usize> {
    (n > 0).then_some(n as usize)
}
