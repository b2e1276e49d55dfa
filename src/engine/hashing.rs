//! Content hashing: reported digests and namespaced UUID v5 identifiers.
//!
//! Streams are read once, in fixed-size chunks, and every chunk is fed to two independent
//! accumulators: the canonical SHA-1 that anchors the identifier, and the configured digest.
//! Memory stays bounded by the chunk size whatever the input length.

use std::io::{self, Read};

use md5::Md5;
use serde::Deserialize;
use sha1::Sha1;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::utils::config::HashingConsts;

/// Algorithm of the reported digest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgo {
    #[default]
    Md5,
    Sha1,
    Sha256,
    Blake3,
}

impl DigestAlgo {
    pub fn name(&self) -> &'static str {
        match self {
            DigestAlgo::Md5 => "md5",
            DigestAlgo::Sha1 => "sha1",
            DigestAlgo::Sha256 => "sha256",
            DigestAlgo::Blake3 => "blake3",
        }
    }

    /// Digest length in bytes.
    pub fn output_len(&self) -> usize {
        match self {
            DigestAlgo::Md5 => 16,
            DigestAlgo::Sha1 => 20,
            DigestAlgo::Sha256 | DigestAlgo::Blake3 => 32,
        }
    }
}

/// Running state of one [`DigestAlgo`].
enum DigestState {
    Md5(Md5),
    Sha1(Sha1),
    Sha256(Sha256),
    Blake3(Box<blake3::Hasher>),
}

impl DigestState {
    fn new(algo: DigestAlgo) -> Self {
        match algo {
            DigestAlgo::Md5 => DigestState::Md5(Md5::new()),
            DigestAlgo::Sha1 => DigestState::Sha1(Sha1::new()),
            DigestAlgo::Sha256 => DigestState::Sha256(Sha256::new()),
            DigestAlgo::Blake3 => DigestState::Blake3(Box::new(blake3::Hasher::new())),
        }
    }

    fn update(&mut self, data: &[u8]) {
        match self {
            DigestState::Md5(h) => h.update(data),
            DigestState::Sha1(h) => h.update(data),
            DigestState::Sha256(h) => h.update(data),
            DigestState::Blake3(h) => {
                h.update(data);
            }
        }
    }

    fn finalize(self) -> Vec<u8> {
        match self {
            DigestState::Md5(h) => h.finalize().to_vec(),
            DigestState::Sha1(h) => h.finalize().to_vec(),
            DigestState::Sha256(h) => h.finalize().to_vec(),
            DigestState::Blake3(h) => h.finalize().as_bytes().to_vec(),
        }
    }
}

/// What to compute for one item.
#[derive(Clone, Copy, Debug, Default)]
pub struct DigestRequest {
    /// Reported digest algorithm, if a digest is wanted.
    pub digest: Option<DigestAlgo>,
    /// Namespace of the identifier, if an identifier is wanted.
    pub namespace: Option<Uuid>,
}

impl DigestRequest {
    pub fn is_empty(&self) -> bool {
        self.digest.is_none() && self.namespace.is_none()
    }
}

/// Outputs of the digest engine. Fields are `Some` exactly when requested.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Digests {
    pub digest: Option<Vec<u8>>,
    pub identifier: Option<Uuid>,
}

/// Derive the run's namespace from a seed string (UUID v5 under the DNS namespace).
pub fn namespace_for(seed: &str) -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_DNS, seed.as_bytes())
}

/// Digest in-memory content. The identifier is derived from the bytes themselves.
pub fn digest_bytes(bytes: &[u8], req: &DigestRequest) -> Digests {
    Digests {
        digest: req.digest.map(|algo| {
            let mut state = DigestState::new(algo);
            state.update(bytes);
            state.finalize()
        }),
        identifier: req.namespace.map(|ns| Uuid::new_v5(&ns, bytes)),
    }
}

/// Digest a stream in one pass of fixed-size chunks.
///
/// The identifier is derived from the SHA-1 of the content, whatever `req.digest` is. Nothing
/// is read when nothing is requested. Read errors are returned as-is.
pub fn digest_reader<R: Read>(mut reader: R, req: &DigestRequest) -> io::Result<Digests> {
    if req.is_empty() {
        return Ok(Digests::default());
    }
    let mut anchor = req.namespace.map(|_| Sha1::new());
    let mut state = req.digest.map(DigestState::new);

    let mut buffer = vec![0u8; HashingConsts::HASH_READ_CHUNK_SIZE];
    loop {
        let n = reader.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        let chunk = &buffer[..n];
        if let Some(h) = anchor.as_mut() {
            h.update(chunk);
        }
        if let Some(s) = state.as_mut() {
            s.update(chunk);
        }
    }

    Ok(Digests {
        digest: state.map(DigestState::finalize),
        identifier: anchor
            .zip(req.namespace)
            .map(|(h, ns)| Uuid::new_v5(&ns, &h.finalize())),
    })
}
