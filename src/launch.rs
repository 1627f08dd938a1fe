//! Launch the installed binary with forwarded arguments
//!
//! The launcher never installs anything: a missing binary surfaces as the
//! spawn error.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use anyhow::{Context, Result};
use log::debug;

/// Where the installer puts `binary_name`
pub fn binary_path(install_dir: &Path, binary_name: &str) -> PathBuf {
    install_dir.join(binary_name)
}

/// Run `binary` with `args` verbatim and inherited stdio; return its exit code.
pub fn run<I, S>(binary: &Path, args: I) -> Result<i32>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    debug!("Launching {}", binary.display());
    let status = Command::new(binary)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .with_context(|| format!("Failed to launch {}", binary.display()))?;
    Ok(exit_code(status))
}

/// Map a child's termination to the launcher's exit code.
///
/// A normal exit propagates its code. On Unix a signal-terminated child maps
/// to `128 + signal`, the shell convention. Anything else exits 0.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;

        if let Some(signal) = status.signal() {
            debug!("Child terminated by signal {}", signal);
            return 128 + signal;
        }
    }

    0
}
