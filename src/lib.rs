//! Simulated bandwidth monitor.
//!
//! A fixed set of simulated connections is sampled once per second and drawn
//! as a normalized bar chart on a terminal surface.

pub mod app;
pub mod config;
pub mod constants;
pub mod error;
pub mod font;
pub mod layout;
pub mod source;
pub mod surface;
pub mod ui;
pub mod util;

use std::{fs::OpenOptions, io, path::PathBuf, sync::Mutex};

use tracing_subscriber::EnvFilter;

pub use app::{Driver, DriverState, Pacer, ThreadPacer};
pub use config::ViewConfig;
pub use error::{ConfigError, MonitorError, ResourceError};

/// Installs a file-backed `tracing` subscriber and returns the log path.
///
/// The terminal is owned by the chart, so logs go to `BANDWIDTH_MONITOR_LOG`
/// (default: `bandwidth-monitor.log` in the temp dir). `RUST_LOG` overrides the
/// default `info` filter. Fails if the file cannot be opened or a global
/// subscriber is already installed.
pub fn init_logging() -> io::Result<PathBuf> {
    let path = std::env::var_os(constants::LOG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("bandwidth-monitor.log"));

    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| io::Error::other(format!("tracing init failed: {err}")))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_logging_install_is_reported() {
        // the first call may succeed or not depending on the environment;
        // the global subscriber can only be set once either way
        let _ = init_logging();
        assert!(init_logging().is_err());
    }
}
