//! portainer-mcp launcher
//!
//! Runs the binary installed by `portainer-mcp-install` from the same
//! directory, forwarding every argument and exiting with the child's code.

use anyhow::Result;

use portainer_mcp_installer::config;
use portainer_mcp_installer::launch;
use portainer_mcp_installer::logging::init_logging;
use portainer_mcp_installer::release::ReleaseManifest;

fn main() {
    // stdout and stdin belong to the child; stay quiet unless asked
    init_logging(log::LevelFilter::Warn);

    match real_main() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("portainer-mcp-run: {e:#}");
            std::process::exit(1);
        }
    }
}

fn real_main() -> Result<i32> {
    let manifest = ReleaseManifest::embedded()?;
    let install_dir = config::install_dir_from_env()?;
    let binary = launch::binary_path(&install_dir, &manifest.binary_name);

    // No flags of our own: everything after argv[0] belongs to the child
    launch::run(&binary, std::env::args_os().skip(1))
}
