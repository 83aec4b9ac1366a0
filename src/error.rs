//! Error taxonomy for the monitor.
//!
//! Both kinds are fatal when they surface during startup; the binary reports
//! the message and exits non-zero.

use std::{io, path::PathBuf};
use thiserror::Error;

/// Invalid construction or configuration parameters.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("source count must be positive, got {0}")]
    EmptySourceSet(usize),

    #[error("rate bounds must be finite with min < max, got [{min}, {max}]")]
    RateBounds { min: f64, max: f64 },

    #[error("viewport must be positive in both dimensions, got {width}x{height}")]
    Viewport { width: f64, height: f64 },

    #[error("label margin {margin} must lie within [0, {height})")]
    Margin { margin: f64, height: f64 },

    #[error("cycle period must be non-zero")]
    ZeroPeriod,
}

/// Failure to acquire or keep a platform resource.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("font file {} could not be read: {source}", .path.display())]
    FontRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("font file {} is not a usable TrueType/OpenType font", .path.display())]
    FontParse { path: PathBuf },

    #[error("rendering surface unavailable: {0}")]
    Surface(#[from] io::Error),

    #[error("failed to install close-request handler: {0}")]
    Signal(#[from] ctrlc::Error),
}

/// Top-level error returned by the driver and the binary's startup path.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Resource(#[from] ResourceError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monitor_error_keeps_inner_message() {
        let err: MonitorError = ConfigError::EmptySourceSet(0).into();
        assert_eq!(err.to_string(), "source count must be positive, got 0");
        assert!(matches!(err, MonitorError::Config(_)));
    }

    #[test]
    fn font_errors_name_the_path() {
        let err = ResourceError::FontParse {
            path: PathBuf::from("/tmp/broken.ttf"),
        };
        assert!(err.to_string().contains("/tmp/broken.ttf"));
    }
}
