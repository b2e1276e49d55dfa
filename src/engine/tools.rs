//! Input classification and small string helpers

use std::borrow::Cow;
use std::path::Path;

use crate::error::SfidError;
use crate::utils::config::DisplayConsts;

/// How an input argument is interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    Dir,
    File,
    Text,
}

/// Directory if it names one, else file if it names an existing regular file, else a literal
/// string. Symlinks are followed.
pub fn classify_input(input: &str) -> InputKind {
    match std::fs::metadata(Path::new(input)) {
        Ok(meta) if meta.is_dir() => InputKind::Dir,
        Ok(meta) if meta.is_file() => InputKind::File,
        _ => InputKind::Text,
    }
}

/// Fail with [`SfidError::EmptyInput`] when `dir` has no entries, or
/// [`SfidError::RootUnreadable`] when it cannot be listed.
pub fn ensure_dir_not_empty(dir: &Path) -> Result<(), SfidError> {
    let mut entries = std::fs::read_dir(dir).map_err(|source| SfidError::RootUnreadable {
        path: dir.to_path_buf(),
        source,
    })?;
    match entries.next() {
        None => Err(SfidError::EmptyInput {
            path: dir.to_path_buf(),
        }),
        Some(Err(source)) => Err(SfidError::RootUnreadable {
            path: dir.to_path_buf(),
            source,
        }),
        Some(Ok(_)) => Ok(()),
    }
}

/// Keep the first `limit` characters of `s`, appending an ellipsis when anything was cut.
/// Counts characters, not bytes, so multi-byte text is never split.
pub fn truncate_chars(s: &str, limit: usize) -> Cow<'_, str> {
    match s.char_indices().nth(limit) {
        None => Cow::Borrowed(s),
        Some((idx, _)) => Cow::Owned(format!("{}{}", &s[..idx], DisplayConsts::ELLIPSIS)),
    }
}
