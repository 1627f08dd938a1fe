//! GitHub release asset resolution

use crate::error::{InstallerError, Result};
use crate::release::ReleaseManifest;

use super::platform::PlatformKey;

/// A release asset ready to be fetched and verified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAsset {
    pub filename: String,
    pub url: String,
    pub expected_digest: String,
}

/// Resolve the asset for `platform` and its pinned digest.
///
/// Fails with `MissingChecksum` when the release has no digest for the asset;
/// an unpinned asset is never downloaded.
pub fn resolve_asset(manifest: &ReleaseManifest, platform: PlatformKey) -> Result<ResolvedAsset> {
    let filename = manifest.asset_filename(platform);
    let expected_digest = manifest
        .checksum_for(&filename)
        .ok_or_else(|| InstallerError::MissingChecksum {
            asset: filename.clone(),
        })?
        .to_string();

    let url = format!(
        "{}/{}/releases/download/{}/{}",
        manifest.base_url.trim_end_matches('/'),
        manifest.repo,
        manifest.version,
        filename
    );

    Ok(ResolvedAsset {
        filename,
        url,
        expected_digest,
    })
}
