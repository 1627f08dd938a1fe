//! Installer and launcher for prebuilt `portainer-mcp` release binaries.
//!
//! The installer downloads the release asset for the host platform, checks it
//! against the SHA-256 pinned in `release.toml`, and unpacks the binary next to
//! itself. The launcher then runs that binary with the caller's arguments.

pub mod config;
pub mod error;
pub mod install;
pub mod launch;
pub mod logging;
pub mod release;

pub use error::{InstallerError, Result};
