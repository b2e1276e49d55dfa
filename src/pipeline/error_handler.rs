use anyhow::Result;
use log::{debug, warn};
use std::sync::PoisonError;

use crate::error::SfidError;

use super::context::{CancelToken, FirstError, SkippedPaths};

/// Check pipeline result after joining walk and workers: report skipped paths, then return the
/// first recorded error, or [`SfidError::Cancelled`] when the run was cancelled from outside.
/// Returns the number of skipped paths.
pub fn check_for_first_error_or_skipped_paths(
    first_error: &FirstError,
    cancel: &CancelToken,
    skipped_paths: &SkippedPaths,
) -> Result<usize> {
    let skipped = skipped_paths.lock().unwrap_or_else(PoisonError::into_inner);
    if !skipped.is_empty() {
        warn!(
            "Skipped {} paths due to permission errors or access issues",
            skipped.len()
        );
        for (p, msg) in skipped.iter() {
            debug!("  skipped: {} ({})", p.display(), msg);
        }
    }
    if let Some(err) = first_error.take() {
        return Err(err);
    }
    if cancel.is_cancelled() {
        return Err(SfidError::Cancelled.into());
    }
    Ok(skipped.len())
}
