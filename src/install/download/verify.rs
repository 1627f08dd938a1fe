//! SHA-256 verification of downloaded release assets

use sha2::{Digest, Sha256};

use crate::error::{InstallerError, Result};

/// SHA-256 of `data` as lowercase hex.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Check `data` against the pinned digest before anything is written to disk.
pub fn verify(data: &[u8], expected: &str) -> Result<()> {
    let actual = sha256_hex(data);
    if actual != expected {
        return Err(InstallerError::ChecksumMismatch {
            expected: expected.to_string(),
            actual,
        });
    }
    Ok(())
}
