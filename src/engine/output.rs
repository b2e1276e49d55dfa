//! Result sink: formatting of [`Output`] records and the printer loop that drains the pipeline.

use std::borrow::Cow;
use std::fmt;
use std::io::Write;

use anyhow::{Context, Result};
use crossbeam_channel::Receiver;
use serde::{Deserialize, Serialize};

use crate::engine::progress::{ProgressBar, update_progress_bar};
use crate::engine::tools::truncate_chars;
use crate::utils::config::DisplayConsts;
use crate::{Kind, Output};

/// Printed record layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `source<TAB>identifier<TAB>digest`, absent fields empty.
    #[default]
    Tsv,
    /// One JSON object per line; absent fields omitted.
    Json,
}

/// Source as shown to users: STRING sources are cut to the display limit, paths never are.
pub fn display_source(output: &Output) -> Cow<'_, str> {
    match output.kind {
        Kind::String => truncate_chars(&output.source, DisplayConsts::SOURCE_DISPLAY_LIMIT),
        Kind::File => Cow::Borrowed(&output.source),
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}",
            display_source(self),
            self.identifier_string(),
            self.digest_hex()
        )
    }
}

#[derive(Serialize)]
struct JsonRecord<'a> {
    kind: Kind,
    source: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    digest: Option<String>,
}

/// Render one record as a single line (no trailing newline).
pub fn format_output(output: &Output, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Tsv => Ok(output.to_string()),
        OutputFormat::Json => {
            let record = JsonRecord {
                kind: output.kind,
                source: &output.source,
                identifier: output.identifier.map(|u| u.to_string()),
                digest: output.digest.as_deref().map(hex::encode),
            };
            serde_json::to_string(&record).context("serialize output record")
        }
    }
}

/// Drain `rx` until every sender is gone, writing one line per record. Returns the number of
/// records written. On a write error the receiver is dropped, which stops the pipeline.
pub fn write_outputs<W: Write>(
    rx: Receiver<Output>,
    format: OutputFormat,
    out: &mut W,
    progress: Option<&ProgressBar>,
) -> Result<usize> {
    let mut written = 0_usize;
    for output in rx.iter() {
        let line = format_output(&output, format)?;
        writeln!(out, "{}", line).context("write output record")?;
        written += 1;
        if let Some(bar) = progress {
            update_progress_bar(bar, 1);
        }
    }
    out.flush().context("flush output")?;
    Ok(written)
}
