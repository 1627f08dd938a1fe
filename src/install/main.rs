//! portainer-mcp installer binary
//!
//! Takes no arguments. Installs the release pinned in `release.toml` for the
//! host platform, or does nothing if it is already installed.

use portainer_mcp_installer::install::ensure_installed;
use portainer_mcp_installer::logging::init_logging;

fn main() {
    init_logging(log::LevelFilter::Info);

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("FATAL: Failed to create Tokio runtime: {e}");
            std::process::exit(1);
        }
    };

    // Printed directly so the failure is visible whatever RUST_LOG says
    if let Err(e) = rt.block_on(ensure_installed()) {
        eprintln!("Failed to install: {e}");
        std::process::exit(e.exit_code());
    }
}
