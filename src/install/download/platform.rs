//! Platform detection for release asset selection

use std::fmt;

use once_cell::sync::OnceCell;

use crate::error::{InstallerError, Result};

/// Operating systems release assets are published for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Os {
    Linux,
    Darwin,
}

/// CPU architectures release assets are published for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cpu {
    Amd64,
    Arm64,
}

impl Os {
    pub const ALL: [Os; 2] = [Os::Linux, Os::Darwin];

    /// Name used in asset filenames
    pub fn as_str(self) -> &'static str {
        match self {
            Os::Linux => "linux",
            Os::Darwin => "darwin",
        }
    }

    fn from_host(raw: &str) -> Option<Self> {
        match raw {
            "linux" => Some(Os::Linux),
            // Rust reports "macos", Node reports "darwin"
            "macos" | "darwin" => Some(Os::Darwin),
            _ => None,
        }
    }
}

impl Cpu {
    pub const ALL: [Cpu; 2] = [Cpu::Amd64, Cpu::Arm64];

    /// Name used in asset filenames
    pub fn as_str(self) -> &'static str {
        match self {
            Cpu::Amd64 => "amd64",
            Cpu::Arm64 => "arm64",
        }
    }

    fn from_host(raw: &str) -> Option<Self> {
        match raw {
            "x86_64" | "x64" | "amd64" => Some(Cpu::Amd64),
            "aarch64" | "arm64" => Some(Cpu::Arm64),
            _ => None,
        }
    }
}

/// Host platform as named in release assets (e.g. `linux-amd64`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlatformKey {
    pub os: Os,
    pub cpu: Cpu,
}

/// Global cache for platform detection (initialized once, used everywhere)
static PLATFORM_CACHE: OnceCell<PlatformKey> = OnceCell::new();

impl PlatformKey {
    /// Map raw host identifiers to a platform key.
    ///
    /// Pure lookup: no I/O happens here, so an unsupported host fails before
    /// anything touches the network or the install directory.
    pub fn resolve(os: &str, cpu: &str) -> Result<Self> {
        match (Os::from_host(os), Cpu::from_host(cpu)) {
            (Some(os), Some(cpu)) => Ok(Self { os, cpu }),
            _ => Err(InstallerError::UnsupportedPlatform {
                os: os.to_string(),
                cpu: cpu.to_string(),
            }),
        }
    }

    /// Detect current platform (cached after first call)
    pub fn detect() -> Result<Self> {
        PLATFORM_CACHE
            .get_or_try_init(|| Self::resolve(std::env::consts::OS, std::env::consts::ARCH))
            .copied()
    }

    /// Every `{os, cpu}` combination the resolver can produce
    pub fn all() -> impl Iterator<Item = PlatformKey> {
        Os::ALL
            .into_iter()
            .flat_map(|os| Cpu::ALL.into_iter().map(move |cpu| PlatformKey { os, cpu }))
    }
}

impl fmt::Display for PlatformKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.os.as_str(), self.cpu.as_str())
    }
}
