use sha2::{Digest, Sha256};

/// SHA-256 hex digest of an inline script body.
///
/// No normalization: whitespace or comment edits change the digest. The
/// empty body is valid input and yields the digest of the empty string.
pub fn sha256_hex(text: &str) -> String {
    let mut sha = Sha256::new();
    sha.update(text.as_bytes());
    hex::encode(sha.finalize())
}
