//! Error taxonomy for the install pipeline
//!
//! Every stage returns `Result<_, InstallerError>`. None of these are recovered
//! locally: the installer binary reports the error once and exits non-zero.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InstallerError {
    #[error("Unsupported platform: {os}/{cpu}. Supported: linux/darwin on x64 (amd64) or arm64")]
    UnsupportedPlatform { os: String, cpu: String },

    #[error("No checksum found for {asset}")]
    MissingChecksum { asset: String },

    #[error("HTTP {status} for {url}")]
    DownloadStatus { status: u16, url: String },

    #[error("Request to {url} failed: {source}")]
    DownloadTransport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Too many redirects (limit {limit}) while fetching {url}")]
    TooManyRedirects { url: String, limit: usize },

    #[error(
        "SHA256 mismatch!\n  Expected: {expected}\n  Got:      {actual}\nThe downloaded file may have been tampered with."
    )]
    ChecksumMismatch { expected: String, actual: String },

    #[error("Failed to {action} {}: {source}", .path.display())]
    Install {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Archive {archive} did not contain {binary} at its root")]
    BinaryMissing { binary: String, archive: String },

    #[error("Invalid installer configuration: {0}")]
    Config(String),
}

impl InstallerError {
    /// Wrap an I/O failure from the write/extract/chmod steps.
    pub fn install(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Install {
            action,
            path: path.into(),
            source,
        }
    }

    /// Process exit status for this failure. Every variant is terminal.
    pub fn exit_code(&self) -> i32 {
        1
    }
}

pub type Result<T, E = InstallerError> = std::result::Result<T, E>;
