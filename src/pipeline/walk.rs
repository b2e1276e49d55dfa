//! File enumeration and the walk loop: discovers regular files under a root and feeds them to
//! the path queue, honouring cancellation.

use crossbeam_channel::Sender;
use log::{debug, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::PoisonError;
use std::thread::{self, JoinHandle};

use crate::error::SfidError;

use super::context::{PipelineContext, WalkOpts};

/// One result from a directory walk: a regular file, or an error with optional path.
/// `fatal` is set only for errors on the root itself.
#[derive(Debug)]
pub enum WalkOutcome {
    Ok(PathBuf),
    Err {
        msg: String,
        path: Option<PathBuf>,
        fatal: bool,
    },
}

/// Convert a walkdir result into [`WalkOutcome`]. Directories, symlinks (when not followed) and
/// special files yield `None`.
pub fn to_outcome_walkdir(r: Result<walkdir::DirEntry, walkdir::Error>) -> Option<WalkOutcome> {
    match r {
        Ok(entry) => entry
            .file_type()
            .is_file()
            .then(|| WalkOutcome::Ok(entry.into_path())),
        Err(err) => Some(WalkOutcome::Err {
            msg: format!("{}", err),
            path: err.path().map(PathBuf::from),
            fatal: err.depth() == 0,
        }),
    }
}

/// Convert a `read_dir` entry into [`WalkOutcome`]. With `follow_links`, a symlink counts when it
/// resolves to a regular file.
pub fn to_outcome_read_dir(
    r: io::Result<fs::DirEntry>,
    follow_links: bool,
) -> Option<WalkOutcome> {
    let entry = match r {
        Ok(entry) => entry,
        Err(err) => {
            return Some(WalkOutcome::Err {
                msg: format!("{}", err),
                path: None,
                fatal: false,
            });
        }
    };
    let path = entry.path();
    let file_type = if follow_links {
        fs::metadata(&path).map(|m| m.file_type())
    } else {
        entry.file_type()
    };
    match file_type {
        Ok(ft) if ft.is_file() => Some(WalkOutcome::Ok(path)),
        Ok(_) => None,
        Err(err) => Some(WalkOutcome::Err {
            msg: format!("{}", err),
            path: Some(path),
            fatal: false,
        }),
    }
}

fn walkdir_iter(root: &Path, follow_links: bool) -> Box<dyn Iterator<Item = WalkOutcome> + Send> {
    use walkdir::WalkDir;
    Box::new(
        WalkDir::new(root)
            .follow_links(follow_links)
            .into_iter()
            .filter_map(to_outcome_walkdir),
    )
}

fn read_dir_iter(
    root: &Path,
    follow_links: bool,
) -> io::Result<Box<dyn Iterator<Item = WalkOutcome> + Send>> {
    let entries = fs::read_dir(root)?;
    Ok(Box::new(entries.filter_map(move |r| {
        to_outcome_read_dir(r, follow_links)
    })))
}

/// Lazy sequence of regular files under `root`: immediate children only, or the whole subtree
/// when `opts.recursive`. No ordering guarantee. Each call walks afresh.
///
/// Shallow mode fails here if `root` cannot be listed; recursive mode reports the same as a
/// fatal [`WalkOutcome::Err`] on the first item.
pub fn enumerate(
    root: &Path,
    opts: WalkOpts,
) -> io::Result<Box<dyn Iterator<Item = WalkOutcome> + Send>> {
    if opts.recursive {
        Ok(walkdir_iter(root, opts.follow_links))
    } else {
        read_dir_iter(root, opts.follow_links)
    }
}

pub fn spawn_walk_thread(path_tx: Sender<PathBuf>, ctx: PipelineContext) -> JoinHandle<usize> {
    thread::spawn(move || match enumerate(&ctx.root, ctx.walk) {
        Ok(iter) => run_walk_loop(path_tx, &ctx, iter),
        Err(source) => {
            ctx.first_error.record(
                SfidError::RootUnreadable {
                    path: ctx.root.clone(),
                    source,
                }
                .into(),
            );
            0
        }
    })
}

/// Run the walk loop: consume `iter`, send files to `path_tx`, stop on cancellation or when
/// every worker is gone. Non-fatal errors are logged and pushed to `skipped_paths`; a fatal one
/// is recorded as the run's error. Drops `path_tx` when done. Returns the count of paths sent.
pub fn run_walk_loop<I>(path_tx: Sender<PathBuf>, ctx: &PipelineContext, iter: I) -> usize
where
    I: Iterator<Item = WalkOutcome>,
{
    let mut count = 0_usize;
    for outcome in iter {
        if ctx.cancel.is_cancelled() {
            debug!("walk: cancelled after {} paths", count);
            break;
        }
        match outcome {
            WalkOutcome::Ok(path) => {
                if path_tx.send(path).is_err() {
                    debug!("walk: all workers gone, stopping");
                    break;
                }
                count += 1;
            }
            WalkOutcome::Err { msg, path, fatal } => {
                if fatal {
                    ctx.first_error.record(
                        SfidError::RootUnreadable {
                            path: path.unwrap_or_else(|| ctx.root.clone()),
                            source: io::Error::other(msg),
                        }
                        .into(),
                    );
                    break;
                }
                warn!("Skipping entry: {}", msg);
                let to_push = path.unwrap_or_else(|| ctx.root.clone());
                ctx.skipped_paths
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push((to_push, msg));
            }
        }
    }
    drop(path_tx);
    count
}
