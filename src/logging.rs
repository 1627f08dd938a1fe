//! Logger setup shared by the installer and launcher binaries
//!
//! Everything goes to stderr: the launched server may own stdout.

use std::io::Write;

use log::LevelFilter;

/// Initialise `env_logger` at `default_level`, overridable with `RUST_LOG`.
pub fn init_logging(default_level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                buf.timestamp_millis(),
                record.level(),
                record.args()
            )
        })
        .init();
}
