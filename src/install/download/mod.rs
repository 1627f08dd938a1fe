//! Release asset download, verification and extraction
//!
//! ## Module Organization
//!
//! - `platform` - Host platform detection
//! - `github` - Release asset name, URL and pinned digest
//! - `core` - HTTP download with bounded redirect following
//! - `verify` - SHA-256 check against the pinned digest
//! - `extract` - `.tar.gz` unpacking into the install directory

mod core;
mod extract;
mod github;
mod platform;
mod verify;

// Re-export public API
pub use self::core::{Downloader, MAX_REDIRECTS};
pub use extract::install_archive;
pub use github::{ResolvedAsset, resolve_asset};
pub use platform::{Cpu, Os, PlatformKey};
pub use verify::{sha256_hex, verify};
