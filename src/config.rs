//! Startup configuration, fixed for the lifetime of the process.

use std::{path::PathBuf, time::Duration};

use crate::constants::{
    DEFAULT_FONT_PATH, FONT_PATH_ENV, LABEL_FONT_SIZE, LABEL_MARGIN, MAX_RATE, MIN_RATE,
    SOURCE_COUNT, TICK_RATE_MS, VIEWPORT_HEIGHT, VIEWPORT_WIDTH, WINDOW_TITLE,
};
use crate::error::ConfigError;
use crate::layout::Viewport;
use crate::source::RateBounds;

#[derive(Debug, Clone, PartialEq)]
pub struct ViewConfig {
    pub viewport: Viewport,
    pub min_rate: f64,
    pub max_rate: f64,
    pub period: Duration,
    pub source_count: usize,
    pub margin: f64,
    pub font_path: PathBuf,
    pub title: String,
    pub label_size: f32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT),
            min_rate: MIN_RATE,
            max_rate: MAX_RATE,
            period: Duration::from_millis(TICK_RATE_MS),
            source_count: SOURCE_COUNT,
            margin: LABEL_MARGIN,
            font_path: PathBuf::from(DEFAULT_FONT_PATH),
            title: WINDOW_TITLE.to_string(),
            label_size: LABEL_FONT_SIZE,
        }
    }
}

impl ViewConfig {
    /// Defaults, with the font path taken from `BANDWIDTH_MONITOR_FONT` when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(path) = std::env::var_os(FONT_PATH_ENV).filter(|p| !p.is_empty()) {
            config.font_path = PathBuf::from(path);
        }
        config
    }

    /// Rejects values the cycle cannot work with. The first violation wins.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source_count == 0 {
            return Err(ConfigError::EmptySourceSet(self.source_count));
        }
        self.rate_bounds()?;

        let Viewport { width, height } = self.viewport;
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            return Err(ConfigError::Viewport { width, height });
        }
        if !(self.margin >= 0.0 && self.margin < height) {
            return Err(ConfigError::Margin {
                margin: self.margin,
                height,
            });
        }
        if self.period.is_zero() {
            return Err(ConfigError::ZeroPeriod);
        }
        Ok(())
    }

    pub fn rate_bounds(&self) -> Result<RateBounds, ConfigError> {
        RateBounds::new(self.min_rate, self.max_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fixed_startup_configuration() {
        let config = ViewConfig::default();
        assert_eq!(config.viewport, Viewport::new(1600.0, 1200.0));
        assert_eq!(config.source_count, 5);
        assert_eq!(config.period, Duration::from_secs(1));
        assert_eq!((config.min_rate, config.max_rate), (1000.0, 5000.0));
        assert_eq!(config.margin, 100.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_sources_rejected() {
        let config = ViewConfig {
            source_count: 0,
            ..ViewConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptySourceSet(0)));
    }

    #[test]
    fn degenerate_rate_bounds_rejected() {
        let config = ViewConfig {
            min_rate: 5000.0,
            max_rate: 5000.0,
            ..ViewConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::RateBounds { .. })
        ));
    }

    #[test]
    fn non_positive_viewport_rejected() {
        for (w, h) in [(0.0, 1200.0), (1600.0, -1.0), (f64::NAN, 10.0)] {
            let config = ViewConfig {
                viewport: Viewport::new(w, h),
                ..ViewConfig::default()
            };
            assert!(
                matches!(config.validate(), Err(ConfigError::Viewport { .. })),
                "{w}x{h} accepted"
            );
        }
    }

    #[test]
    fn margin_must_leave_room_for_bars() {
        let config = ViewConfig {
            margin: 1200.0,
            ..ViewConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Margin { .. })));
    }

    #[test]
    fn zero_period_rejected() {
        let config = ViewConfig {
            period: Duration::ZERO,
            ..ViewConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroPeriod));
    }
}
