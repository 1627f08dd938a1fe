//! Release metadata pinned at build time
//!
//! `release.toml` at the crate root is compiled into the binaries. It names the
//! release to install and carries the SHA-256 of every published asset, so
//! a download is only ever trusted against a digest shipped with the installer.

use std::collections::BTreeMap;

use once_cell::sync::OnceCell;
use serde::Deserialize;

use crate::error::{InstallerError, Result};
use crate::install::download::PlatformKey;

const EMBEDDED_MANIFEST: &str = include_str!("../release.toml");

static MANIFEST: OnceCell<ReleaseManifest> = OnceCell::new();

fn default_base_url() -> String {
    "https://github.com".to_string()
}

/// Release coordinates plus the asset checksum table.
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseManifest {
    /// Release tag, e.g. `v0.7.0`
    pub version: String,
    /// `owner/name` on the release host
    pub repo: String,
    /// Executable name inside the archive and in the install directory
    pub binary_name: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Asset filename -> lowercase hex SHA-256
    #[serde(default)]
    pub checksums: BTreeMap<String, String>,
    /// `{os}-{cpu}` targets deliberately shipped without an asset
    #[serde(default)]
    pub unpublished: Vec<String>,
}

impl ReleaseManifest {
    /// The manifest compiled into this binary (parsed and validated once)
    pub fn embedded() -> Result<&'static ReleaseManifest> {
        MANIFEST.get_or_try_init(|| Self::from_toml_str(EMBEDDED_MANIFEST))
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let manifest: ReleaseManifest =
            toml::from_str(raw).map_err(|e| InstallerError::Config(e.to_string()))?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// `<binary_name>-<version>-<os>-<cpu>.tar.gz`
    pub fn asset_filename(&self, platform: PlatformKey) -> String {
        format!(
            "{}-{}-{}-{}.tar.gz",
            self.binary_name,
            self.version,
            platform.os.as_str(),
            platform.cpu.as_str()
        )
    }

    pub fn checksum_for(&self, asset: &str) -> Option<&str> {
        self.checksums.get(asset).map(String::as_str)
    }

    /// Platforms with a pinned asset for this release
    pub fn published_targets(&self) -> Vec<PlatformKey> {
        PlatformKey::all()
            .filter(|p| self.checksums.contains_key(&self.asset_filename(*p)))
            .collect()
    }

    fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("version", &self.version),
            ("repo", &self.repo),
            ("binary_name", &self.binary_name),
            ("base_url", &self.base_url),
        ] {
            if value.trim().is_empty() {
                return Err(InstallerError::Config(format!("`{field}` is empty")));
            }
        }
        if self.binary_name.contains(['/', '\\']) {
            return Err(InstallerError::Config(format!(
                "`binary_name` must be a bare file name, got {:?}",
                self.binary_name
            )));
        }

        // Every platform is either pinned or explicitly skipped, never both
        for platform in PlatformKey::all() {
            let asset = self.asset_filename(platform);
            let key = platform.to_string();
            match (self.checksums.contains_key(&asset), self.unpublished.contains(&key)) {
                (false, false) => {
                    return Err(InstallerError::Config(format!(
                        "no checksum for {asset}: pin it under [checksums] or list {key:?} in `unpublished`"
                    )));
                }
                (true, true) => {
                    return Err(InstallerError::Config(format!(
                        "{key} is listed in `unpublished` but {asset} has a checksum"
                    )));
                }
                _ => {}
            }
        }
        for key in &self.unpublished {
            if !PlatformKey::all().any(|p| p.to_string() == *key) {
                return Err(InstallerError::Config(format!(
                    "`unpublished` entry {key:?} is not a supported platform"
                )));
            }
        }

        let producible: Vec<String> = PlatformKey::all().map(|p| self.asset_filename(p)).collect();
        for (asset, digest) in &self.checksums {
            if !producible.contains(asset) {
                return Err(InstallerError::Config(format!(
                    "checksum entry {asset} does not match any {} asset of {}",
                    self.binary_name, self.version
                )));
            }
            if !is_sha256_hex(digest) {
                return Err(InstallerError::Config(format!(
                    "checksum for {asset} is not a lowercase hex SHA-256: {digest:?}"
                )));
            }
        }
        Ok(())
    }
}

fn is_sha256_hex(digest: &str) -> bool {
    digest.len() == 64 && digest.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}
