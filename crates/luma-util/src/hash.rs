//! SHA-256 digests for registry archives.

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Digest everything `reader` yields, returning a lowercase hex string.
pub fn sha256_reader<R: Read>(mut reader: R) -> io::Result<String> {
    let mut hasher = Sha256::new();
    io::copy(&mut reader, &mut hasher)?;
    Ok(format!("{:x}", hasher.finalize()))
}

/// Digest the file at `path` without loading it into memory.
pub fn sha256_file(path: &Path) -> io::Result<String> {
    sha256_reader(BufReader::new(File::open(path)?))
}

/// Returns true if `s` is a lowercase hex SHA-256 digest (64 characters of `[0-9a-f]`).
pub fn is_sha256_hex(s: &str) -> bool {
    s.len() == 64 && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}
