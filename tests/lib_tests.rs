use sfid::engine::{
    DigestAlgo, DigestRequest, Item, Resolver, digest_bytes, digest_reader, display_source,
    format_output, namespace_for, truncate_chars,
};
use sfid::{Config, Kind, Output, OutputFormat};
use std::io::{self, Cursor, Read, Write};
use uuid::Uuid;

const SOME_STRING: &str = "some string";
const SOME_STRING_UUID: &str = "5d59011b-e790-5232-8c5c-a13ff1fe88b3";
const SOME_STRING_MD5: &str = "5ac749fbeec93607fc28d666be85e73a";

fn config(uuid: bool, digest: bool) -> Config {
    Config {
        with_identifier: uuid,
        with_digest: digest,
        ..Default::default()
    }
}

fn patterned(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 31 % 251) as u8).collect()
}

/// Reader that hands out at most `step` bytes per call.
struct Trickle<'a> {
    data: &'a [u8],
    step: usize,
}

impl Read for Trickle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.step.min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

/// Reader that fails after `ok_bytes`.
struct Broken {
    ok_bytes: usize,
}

impl Read for Broken {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.ok_bytes == 0 {
            return Err(io::Error::other("simulated read failure"));
        }
        let n = self.ok_bytes.min(buf.len());
        buf[..n].fill(b'x');
        self.ok_bytes -= n;
        Ok(n)
    }
}

// --- namespace / identifiers ---

#[test]
fn test_namespace_is_v5_under_dns() {
    let ns = namespace_for("speciesfilegroup.org");
    assert_eq!(ns, Uuid::new_v5(&Uuid::NAMESPACE_DNS, b"speciesfilegroup.org"));
    assert_eq!(ns.get_version_num(), 5);
}

#[test]
fn test_string_identifier_known_value() {
    let out = Resolver::new(&config(true, false)).resolve_text(SOME_STRING);
    assert_eq!(out.kind, Kind::String);
    assert_eq!(out.identifier.unwrap().to_string(), SOME_STRING_UUID);
    assert!(out.digest.is_none());
}

#[test]
fn test_string_md5_known_value() {
    let out = Resolver::new(&config(false, true)).resolve_text(SOME_STRING);
    assert_eq!(hex::encode(out.digest.unwrap()), SOME_STRING_MD5);
    assert!(out.identifier.is_none());
}

#[test]
fn test_string_digests_are_deterministic() {
    let resolver = Resolver::new(&config(true, true));
    let a = resolver.resolve_text("Homo sapiens Linnaeus, 1758");
    let b = resolver.resolve_text("Homo sapiens Linnaeus, 1758");
    assert_eq!(a, b);
}

#[test]
fn test_namespace_changes_identifier() {
    let default_ns = Resolver::new(&config(true, false)).resolve_text(SOME_STRING);
    let gn = Resolver::new(&Config {
        namespace: "globalnames.org".to_string(),
        ..config(true, false)
    })
    .resolve_text(SOME_STRING);
    assert_ne!(default_ns.identifier, gn.identifier);
}

#[test]
fn test_neither_requested_still_yields_record() {
    let out = Resolver::new(&config(false, false)).resolve_text(SOME_STRING);
    assert_eq!(out.source, SOME_STRING);
    assert!(out.digest.is_none());
    assert!(out.identifier.is_none());
}

#[test]
fn test_resolve_item_text() {
    let resolver = Resolver::new(&config(true, true));
    let out = resolver.resolve(&Item::Text(SOME_STRING.to_string())).unwrap();
    assert_eq!(out.to_string(), format!("{SOME_STRING}\t{SOME_STRING_UUID}\t{SOME_STRING_MD5}"));
}

// --- digest engine ---

#[test]
fn test_digest_bytes_each_algo_matches_one_shot() {
    use sha2::Digest;
    let data = b"The quick brown fox jumps over the lazy dog";
    let cases: [(DigestAlgo, Vec<u8>); 4] = [
        (DigestAlgo::Md5, md5::Md5::digest(data).to_vec()),
        (DigestAlgo::Sha1, sha1::Sha1::digest(data).to_vec()),
        (DigestAlgo::Sha256, sha2::Sha256::digest(data).to_vec()),
        (DigestAlgo::Blake3, blake3::hash(data).as_bytes().to_vec()),
    ];
    for (algo, expected) in cases {
        let req = DigestRequest {
            digest: Some(algo),
            namespace: None,
        };
        let got = digest_bytes(data, &req).digest.unwrap();
        assert_eq!(got, expected, "{}", algo.name());
        assert_eq!(got.len(), algo.output_len());
    }
}

#[test]
fn test_digest_reader_matches_in_memory_across_chunks() {
    use sha2::Digest;
    // Larger than two read chunks, not a multiple of the chunk size.
    let data = patterned(64 * 1024 * 2 + 1234);
    let ns = namespace_for("speciesfilegroup.org");
    let req = DigestRequest {
        digest: Some(DigestAlgo::Sha256),
        namespace: Some(ns),
    };
    let got = digest_reader(Cursor::new(&data), &req).unwrap();
    assert_eq!(got.digest.unwrap(), sha2::Sha256::digest(&data).to_vec());
    let anchor = sha1::Sha1::digest(&data);
    assert_eq!(got.identifier.unwrap(), Uuid::new_v5(&ns, &anchor));
}

#[test]
fn test_digest_reader_short_reads_do_not_change_result() {
    let data = patterned(10_000);
    let req = DigestRequest {
        digest: Some(DigestAlgo::Md5),
        namespace: Some(namespace_for("taxonworks.org")),
    };
    let whole = digest_reader(Cursor::new(&data), &req).unwrap();
    let trickled = digest_reader(Trickle { data: &data, step: 7 }, &req).unwrap();
    assert_eq!(whole, trickled);
}

#[test]
fn test_file_identifier_anchor_independent_of_digest_algo() {
    let data = patterned(5000);
    let ns = namespace_for("speciesfilegroup.org");
    let mut ids = Vec::new();
    for algo in [DigestAlgo::Md5, DigestAlgo::Sha256, DigestAlgo::Blake3] {
        let req = DigestRequest {
            digest: Some(algo),
            namespace: Some(ns),
        };
        ids.push(digest_reader(Cursor::new(&data), &req).unwrap().identifier);
    }
    assert!(ids.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn test_stream_identifier_differs_from_bytes_identifier() {
    // Strings hash their bytes directly; streams hash the SHA-1 of their bytes.
    let req = DigestRequest {
        digest: None,
        namespace: Some(namespace_for("speciesfilegroup.org")),
    };
    let direct = digest_bytes(SOME_STRING.as_bytes(), &req).identifier;
    let streamed = digest_reader(Cursor::new(SOME_STRING), &req)
        .unwrap()
        .identifier;
    assert_ne!(direct, streamed);
}

#[test]
fn test_digest_reader_propagates_read_error() {
    let req = DigestRequest {
        digest: Some(DigestAlgo::Md5),
        namespace: None,
    };
    let err = digest_reader(Broken { ok_bytes: 100 }, &req).unwrap_err();
    assert_eq!(err.to_string(), "simulated read failure");
}

#[test]
fn test_digest_reader_nothing_requested_reads_nothing() {
    let got = digest_reader(Broken { ok_bytes: 0 }, &DigestRequest::default()).unwrap();
    assert!(got.digest.is_none());
    assert!(got.identifier.is_none());
}

#[test]
fn test_resolve_file_streams_content() {
    use sha2::Digest;
    let mut file = tempfile::NamedTempFile::new().unwrap();
    let data = patterned(70_000);
    file.write_all(&data).unwrap();
    file.flush().unwrap();

    let out = Resolver::new(&config(true, true))
        .resolve_file(file.path())
        .unwrap();
    assert_eq!(out.kind, Kind::File);
    assert_eq!(out.source, file.path().to_string_lossy());
    assert_eq!(out.digest.unwrap(), md5::Md5::digest(&data).to_vec());
    let ns = namespace_for("speciesfilegroup.org");
    assert_eq!(
        out.identifier.unwrap(),
        Uuid::new_v5(&ns, &sha1::Sha1::digest(&data))
    );
}

#[test]
fn test_resolve_missing_file_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.txt");
    let err = Resolver::new(&config(true, false))
        .resolve_file(&missing)
        .unwrap_err();
    assert!(matches!(err, sfid::SfidError::Read { ref path, .. } if *path == missing));
}

// --- formatting ---

fn string_output(source: &str) -> Output {
    Output {
        kind: Kind::String,
        source: source.to_string(),
        digest: None,
        identifier: None,
    }
}

#[test]
fn test_tsv_empty_fields() {
    assert_eq!(string_output(SOME_STRING).to_string(), "some string\t\t");
}

#[test]
fn test_tsv_field_order() {
    let out = Output {
        digest: Some(hex::decode(SOME_STRING_MD5).unwrap()),
        identifier: Some(SOME_STRING_UUID.parse().unwrap()),
        ..string_output(SOME_STRING)
    };
    assert_eq!(
        format_output(&out, OutputFormat::Tsv).unwrap(),
        format!("{SOME_STRING}\t{SOME_STRING_UUID}\t{SOME_STRING_MD5}")
    );
}

#[test]
fn test_tsv_identifier_only() {
    let out = Output {
        identifier: Some(SOME_STRING_UUID.parse().unwrap()),
        ..string_output(SOME_STRING)
    };
    assert_eq!(out.to_string(), format!("{SOME_STRING}\t{SOME_STRING_UUID}\t"));
}

#[test]
fn test_long_string_truncated_for_display_only() {
    let long = "a".repeat(150);
    let resolver = Resolver::new(&config(false, true));
    let out = resolver.resolve_text(&long);
    assert_eq!(out.source.len(), 150);
    assert_eq!(display_source(&out), format!("{}...", "a".repeat(100)));
    // The digest covers every byte, not the displayed prefix.
    assert_ne!(out.digest, resolver.resolve_text(&"a".repeat(100)).digest);
}

#[test]
fn test_exactly_limit_not_truncated() {
    let s = "b".repeat(100);
    assert_eq!(display_source(&string_output(&s)), s);
}

#[test]
fn test_file_sources_never_truncated() {
    let path = format!("/data/{}.txt", "c".repeat(200));
    let out = Output {
        kind: Kind::File,
        ..string_output(&path)
    };
    assert_eq!(display_source(&out), path);
}

#[test]
fn test_truncate_chars_multibyte() {
    let s = "é".repeat(101);
    let t = truncate_chars(&s, 100);
    assert_eq!(t.chars().count(), 103);
    assert!(t.ends_with("é..."));
}

#[test]
fn test_json_omits_absent_fields() {
    let line = format_output(&string_output(SOME_STRING), OutputFormat::Json).unwrap();
    let v: serde_json::Value = serde_json::from_str(&line).unwrap();
    assert_eq!(v["kind"], "STRING");
    assert_eq!(v["source"], SOME_STRING);
    assert!(v.get("identifier").is_none());
    assert!(v.get("digest").is_none());
}

#[test]
fn test_json_present_fields() {
    let out = Resolver::new(&config(true, true)).resolve_text(SOME_STRING);
    let line = format_output(&out, OutputFormat::Json).unwrap();
    let v: serde_json::Value = serde_json::from_str(&line).unwrap();
    assert_eq!(v["identifier"], SOME_STRING_UUID);
    assert_eq!(v["digest"], SOME_STRING_MD5);
}
