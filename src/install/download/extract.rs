//! Release archive extraction
//!
//! Unpacks a verified `.tar.gz` asset into the install directory and marks the
//! binary at its root executable.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use log::{debug, warn};
use tar::Archive;

use crate::error::{InstallerError, Result};

/// RAII wrapper for the downloaded archive inside the install directory
///
/// The archive is removed explicitly once extraction succeeds; if any step
/// fails first, Drop removes it so a failed run leaves no partial archive.
struct TransientArchive {
    path: PathBuf,
    removed: bool,
}

impl TransientArchive {
    fn write(path: PathBuf, data: &[u8]) -> Result<Self> {
        // Guard before writing so a half-written file is cleaned up too
        let archive = Self {
            path,
            removed: false,
        };
        fs::write(&archive.path, data)
            .map_err(|e| InstallerError::install("write archive", &archive.path, e))?;
        Ok(archive)
    }

    #[inline]
    fn path(&self) -> &Path {
        &self.path
    }

    fn remove(mut self) -> Result<()> {
        self.removed = true;
        fs::remove_file(&self.path)
            .map_err(|e| InstallerError::install("remove archive", &self.path, e))
    }
}

impl Drop for TransientArchive {
    fn drop(&mut self) {
        if self.removed {
            return;
        }
        if let Err(e) = fs::remove_file(&self.path)
            && e.kind() != ErrorKind::NotFound
        {
            warn!("Failed to remove {}: {}", self.path.display(), e);
        }
    }
}

/// Install `binary_name` from the gzip tar `data` into `install_dir`.
///
/// Returns the existing path untouched when the binary is already installed.
/// Otherwise writes the archive as `install_dir/archive_name`, unpacks it into
/// `install_dir`, deletes the archive and sets mode 0755 on the binary.
pub fn install_archive(
    data: &[u8],
    install_dir: &Path,
    archive_name: &str,
    binary_name: &str,
) -> Result<PathBuf> {
    let binary_path = install_dir.join(binary_name);
    if binary_path.exists() {
        debug!("{} already present, not extracting", binary_path.display());
        return Ok(binary_path);
    }

    fs::create_dir_all(install_dir)
        .map_err(|e| InstallerError::install("create install directory", install_dir, e))?;

    let archive = TransientArchive::write(install_dir.join(archive_name), data)?;
    unpack_tar_gz(archive.path(), install_dir)?;
    archive.remove()?;

    if !binary_path.is_file() {
        return Err(InstallerError::BinaryMissing {
            binary: binary_name.to_string(),
            archive: archive_name.to_string(),
        });
    }

    mark_executable(&binary_path)?;
    Ok(binary_path)
}

fn unpack_tar_gz(archive_path: &Path, destination: &Path) -> Result<()> {
    let file = fs::File::open(archive_path)
        .map_err(|e| InstallerError::install("open archive", archive_path, e))?;
    let mut archive = Archive::new(GzDecoder::new(file));
    archive
        .unpack(destination)
        .map_err(|e| InstallerError::install("extract archive", archive_path, e))
}

#[cfg(unix)]
fn mark_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .map_err(|e| InstallerError::install("set permissions on", path, e))
}

#[cfg(not(unix))]
fn mark_executable(_path: &Path) -> Result<()> {
    Ok(())
}
