//! Runtime configuration read from the environment
//!
//! The release itself is pinned in `release.toml`; only where it is installed
//! and which host serves it can be changed at run time.

use std::ffi::OsString;
use std::path::PathBuf;

use crate::error::{InstallerError, Result};
use crate::release::ReleaseManifest;

/// Overrides the install directory (default: next to the running executable)
pub const INSTALL_DIR_ENV: &str = "PORTAINER_MCP_INSTALL_DIR";

/// Overrides the release host, e.g. for a mirror. Digests are still enforced.
pub const BASE_URL_ENV: &str = "PORTAINER_MCP_RELEASE_BASE_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallerConfig {
    pub install_dir: PathBuf,
    pub base_url: Option<String>,
}

impl InstallerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var_os(key))
    }

    /// Build from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<OsString>) -> Result<Self> {
        let install_dir = install_dir_from_lookup(&lookup)?;
        let base_url = lookup(BASE_URL_ENV)
            .filter(|v| !v.is_empty())
            .map(|v| {
                v.into_string().map_err(|v| {
                    InstallerError::Config(format!("{BASE_URL_ENV} is not valid UTF-8: {v:?}"))
                })
            })
            .transpose()?;

        Ok(Self {
            install_dir,
            base_url,
        })
    }

    /// The release manifest with run-time overrides applied
    pub fn apply(&self, manifest: &ReleaseManifest) -> ReleaseManifest {
        let mut manifest = manifest.clone();
        if let Some(base_url) = &self.base_url {
            manifest.base_url = base_url.clone();
        }
        manifest
    }
}

/// Install directory alone, for callers that never download
pub fn install_dir_from_env() -> Result<PathBuf> {
    install_dir_from_lookup(|key| std::env::var_os(key))
}

pub fn install_dir_from_lookup(lookup: impl Fn(&str) -> Option<OsString>) -> Result<PathBuf> {
    match lookup(INSTALL_DIR_ENV).filter(|v| !v.is_empty()) {
        Some(dir) => Ok(PathBuf::from(dir)),
        None => default_install_dir(),
    }
}

/// Directory holding the running executable
pub fn default_install_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe()
        .map_err(|e| InstallerError::install("locate", "current executable", e))?;
    exe.parent().map(PathBuf::from).ok_or_else(|| {
        InstallerError::install(
            "locate parent directory of",
            &exe,
            std::io::Error::other("executable has no parent directory"),
        )
    })
}
