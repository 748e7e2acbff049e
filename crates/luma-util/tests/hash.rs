use luma_util::hash::{is_sha256_hex, sha256_file, sha256_reader};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

#[test]
fn test_sha256_reader_empty() {
    let hash = sha256_reader(&b""[..]).unwrap();
    assert_eq!(
        hash,
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

#[test]
fn test_sha256_reader_hello() {
    let hash = sha256_reader(&b"hello"[..]).unwrap();
    assert_eq!(
        hash,
        "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
    );
}

#[test]
fn test_sha256_file_matches_reader() {
    let mut tmp = NamedTempFile::new().unwrap();
    tmp.write_all(b"archive bytes").unwrap();
    tmp.flush().unwrap();
    let file_hash = sha256_file(tmp.path()).unwrap();
    assert_eq!(file_hash, sha256_reader(&b"archive bytes"[..]).unwrap());
}

#[test]
fn test_sha256_file_spans_buffer_boundary() {
    let data = vec![0x5au8; 3 * 8192 + 17];
    let mut tmp = NamedTempFile::new().unwrap();
    tmp.write_all(&data).unwrap();
    tmp.flush().unwrap();
    assert_eq!(
        sha256_file(tmp.path()).unwrap(),
        sha256_reader(data.as_slice()).unwrap()
    );
}

#[test]
fn test_sha256_file_not_found() {
    let result = sha256_file(Path::new("/nonexistent/path/archive.zip"));
    assert!(result.is_err());
}

#[test]
fn test_is_sha256_hex_accepts_digest() {
    assert!(is_sha256_hex(&sha256_reader(&b"luma"[..]).unwrap()));
}

#[test]
fn test_is_sha256_hex_rejects_uppercase_and_length() {
    let upper = sha256_reader(&b"luma"[..]).unwrap().to_uppercase();
    assert!(!is_sha256_hex(&upper));
    assert!(!is_sha256_hex("abc123"));
    assert!(!is_sha256_hex(&"g".repeat(64)));
    assert!(!is_sha256_hex(&"a".repeat(65)));
}
