//! CLI command handler: merge settings, run the identifier, print records as they stream in.

use anyhow::{Context, Result};
use crossbeam_channel::bounded;
use log::debug;
use std::io::{self, BufWriter};
use std::thread;

use crate::engine::arg_parser::Cli;
use crate::engine::output::write_outputs;
use crate::engine::progress::{create_counter, refresh_bar};
use crate::utils::config::{ChannelCaps, Namespaces};
use crate::utils::setup_logging;
use crate::utils::sfid_toml::{
    apply_file_to_opts, default_config_path, load_sfid_toml, positive_jobs,
};
use crate::{CancelToken, Opts, Output, Sfid};

/// Overwrite opts field from a CLI flag when it was given.
macro_rules! apply_cli_opt {
    ($cli:expr, $opts:expr, $cli_field:ident => $($opts_field:ident).+) => {
        if let Some(v) = $cli.$cli_field.clone() {
            $opts.$($opts_field).+ = v;
        }
    };
}

/// Defaults, then the settings file, then CLI flags.
pub fn build_opts(cli: &Cli) -> Result<Opts> {
    let mut opts = Opts::default();

    let (path, required) = match &cli.config {
        Some(p) => (p.clone(), true),
        None => (default_config_path(), false),
    };
    if let Some(file) = load_sfid_toml(&path, required)? {
        apply_file_to_opts(&file, &mut opts);
        opts.config_path = Some(path);
    }

    apply_cli_opt!(cli, opts, uuid => config.with_identifier);
    apply_cli_opt!(cli, opts, digest => config.with_digest);
    apply_cli_opt!(cli, opts, algorithm => config.digest_algo);
    apply_cli_opt!(cli, opts, namespace => config.namespace);
    if cli.gn_namespace {
        opts.config.namespace = Namespaces::GLOBALNAMES.to_string();
    }
    if cli.tw_namespace {
        opts.config.namespace = Namespaces::TAXONWORKS.to_string();
    }
    apply_cli_opt!(cli, opts, recursive => config.recursive);
    apply_cli_opt!(cli, opts, follow_links => config.follow_links);
    if let Some(n) = cli.jobs_number {
        opts.config.jobs = positive_jobs(n);
    }
    apply_cli_opt!(cli, opts, format => format);
    apply_cli_opt!(cli, opts, progress => progress);
    apply_cli_opt!(cli, opts, verbose => verbose);
    Ok(opts)
}

/// Identify `cli.input` and print one line per record on stdout.
pub fn handle_run(cli: &Cli) -> Result<()> {
    let opts = build_opts(cli)?;
    setup_logging(opts.verbose);
    if let Some(p) = &opts.config_path {
        debug!("Loaded settings from {}", p.display());
    }

    let cancel = CancelToken::new();
    let cancel_handler = cancel.clone();
    ctrlc::set_handler(move || cancel_handler.cancel()).context("set Ctrl+C handler")?;

    let sfid = Sfid::new(opts.config.clone()).with_cancel(cancel);
    let (out_tx, out_rx) = bounded::<Output>(ChannelCaps::OUTPUT);

    let bar = opts.progress.then(|| {
        let b = create_counter("Identifying");
        refresh_bar(&b);
        b
    });
    let format = opts.format;
    let printer = thread::spawn(move || {
        let stdout = io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        write_outputs(out_rx, format, &mut out, bar.as_ref())
    });

    let result = sfid.process(&cli.input, out_tx);
    let printed = printer
        .join()
        .map_err(|_| anyhow::anyhow!("printer thread panicked"))?;
    // A failed printer is the root cause of any SinkClosed the pipeline reports.
    let written = printed?;
    result.with_context(|| format!("cannot process '{}'", cli.input))?;
    debug!("Printed {} records", written);
    Ok(())
}
