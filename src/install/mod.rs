//! portainer-mcp installation
//!
//! One linear pipeline: detect platform, resolve the pinned asset, download,
//! verify, extract, chmod. Idempotent: an existing binary short-circuits
//! everything after asset resolution, so a re-run makes no requests and
//! writes nothing.

pub mod download;

use std::path::{Path, PathBuf};

use log::info;

use crate::config::InstallerConfig;
use crate::error::{InstallerError, Result};
use crate::release::ReleaseManifest;
use download::{Downloader, PlatformKey};

/// Result of an install run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// Binary was downloaded, verified and unpacked by this run
    Installed(PathBuf),
    /// Binary was already present; nothing was fetched or written
    AlreadyPresent(PathBuf),
}

impl InstallOutcome {
    pub fn path(&self) -> &Path {
        match self {
            InstallOutcome::Installed(path) | InstallOutcome::AlreadyPresent(path) => path,
        }
    }
}

/// Installs one pinned release into one directory
#[derive(Debug, Clone)]
pub struct Installer {
    manifest: ReleaseManifest,
    install_dir: PathBuf,
    downloader: Downloader,
}

impl Installer {
    pub fn new(manifest: ReleaseManifest, install_dir: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            manifest,
            install_dir: install_dir.into(),
            downloader: Downloader::new()?,
        })
    }

    pub fn with_downloader(mut self, downloader: Downloader) -> Self {
        self.downloader = downloader;
        self
    }

    pub fn binary_path(&self) -> PathBuf {
        self.install_dir.join(&self.manifest.binary_name)
    }

    /// Install for the host platform
    pub async fn install(&self) -> Result<InstallOutcome> {
        let platform = PlatformKey::detect()?;
        self.install_for(platform).await
    }

    /// Install for a host reporting `os`/`arch`; unsupported hosts fail
    /// before any request or write
    pub async fn install_for_host(&self, os: &str, arch: &str) -> Result<InstallOutcome> {
        let platform = PlatformKey::resolve(os, arch)?;
        self.install_for(platform).await
    }

    /// Install the asset published for `platform`
    pub async fn install_for(&self, platform: PlatformKey) -> Result<InstallOutcome> {
        let asset = download::resolve_asset(&self.manifest, platform)?;
        let binary_name = self.manifest.binary_name.clone();
        let binary_path = self.binary_path();

        if binary_path.exists() {
            info!("{} already exists, skipping download", binary_name);
            return Ok(InstallOutcome::AlreadyPresent(binary_path));
        }

        info!("Downloading {}...", asset.filename);
        let data = self.downloader.fetch(&asset.url).await?;

        info!("Verifying SHA256 checksum...");
        download::verify(&data, &asset.expected_digest)?;
        info!("Checksum OK");

        // Blocking file I/O and decompression off the async workers
        let install_dir = self.install_dir.clone();
        let archive_name = asset.filename.clone();
        let path = tokio::task::spawn_blocking(move || {
            download::install_archive(&data, &install_dir, &archive_name, &binary_name)
        })
        .await
        .map_err(|e| {
            InstallerError::install("extract archive into", &self.install_dir, std::io::Error::other(e))
        })??;

        info!("Installed {} to {}", self.manifest.binary_name, path.display());
        Ok(InstallOutcome::Installed(path))
    }
}

/// Ensure the pinned release is installed, installing it if needed
///
/// This is the installer binary's entry point: embedded release manifest,
/// environment overrides, host platform.
pub async fn ensure_installed() -> Result<InstallOutcome> {
    let config = InstallerConfig::from_env()?;
    let manifest = config.apply(ReleaseManifest::embedded()?);
    Installer::new(manifest, &config.install_dir)?.install().await
}
