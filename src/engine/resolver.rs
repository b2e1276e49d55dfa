//! Single-item resolution: one string or one file in, one [`Output`] out.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;

use crate::engine::hashing::{DigestRequest, digest_bytes, digest_reader, namespace_for};
use crate::error::SfidError;
use crate::{Config, Kind, Output};

/// Opens files for the resolver. The default reads from the filesystem; tests substitute
/// readers that fail on demand.
pub trait FileOpener: Send + Sync {
    fn open(&self, path: &Path) -> std::io::Result<Box<dyn Read + Send>>;
}

/// [`FileOpener`] backed by [`std::fs::File`].
#[derive(Clone, Copy, Debug, Default)]
pub struct FsOpener;

impl FileOpener for FsOpener {
    fn open(&self, path: &Path) -> std::io::Result<Box<dyn Read + Send>> {
        Ok(Box::new(File::open(path)?))
    }
}

/// An input unit by provenance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Item {
    Text(String),
    File(PathBuf),
}

/// Resolves items into outputs. Holds the request derived from [`Config`] once per run.
#[derive(Clone)]
pub struct Resolver {
    request: DigestRequest,
    opener: Arc<dyn FileOpener>,
}

impl Resolver {
    pub fn new(config: &Config) -> Self {
        Self::with_opener(config, Arc::new(FsOpener))
    }

    pub fn with_opener(config: &Config, opener: Arc<dyn FileOpener>) -> Self {
        let request = DigestRequest {
            digest: config.with_digest.then_some(config.digest_algo),
            namespace: config
                .with_identifier
                .then(|| namespace_for(&config.namespace)),
        };
        Self { request, opener }
    }

    pub fn resolve(&self, item: &Item) -> Result<Output> {
        match item {
            Item::Text(s) => Ok(self.resolve_text(s)),
            Item::File(p) => Ok(self.resolve_file(p)?),
        }
    }

    /// A literal string: hash its UTF-8 bytes. No I/O.
    pub fn resolve_text(&self, text: &str) -> Output {
        let digests = digest_bytes(text.as_bytes(), &self.request);
        Output {
            kind: Kind::String,
            source: text.to_string(),
            digest: digests.digest,
            identifier: digests.identifier,
        }
    }

    /// A file: stream its content through the digest engine. The handle is dropped when this
    /// returns, on success or error.
    pub fn resolve_file(&self, path: &Path) -> Result<Output, SfidError> {
        let reader = self
            .opener
            .open(path)
            .map_err(|e| SfidError::read(path, e))?;
        let digests = digest_reader(reader, &self.request).map_err(|e| SfidError::read(path, e))?;
        Ok(Output {
            kind: Kind::File,
            source: path.to_string_lossy().into_owned(),
            digest: digests.digest,
            identifier: digests.identifier,
        })
    }
}
