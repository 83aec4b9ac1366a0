use rand::distributions::{Distribution, Uniform};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::ConfigError;

// A single simulated connection
#[derive(Debug, Clone, PartialEq)]
pub struct DataSource {
    id: String,
    pub value: f64,
}

impl DataSource {
    pub fn new(id: impl Into<String>, value: f64) -> Self {
        Self {
            id: id.into(),
            value,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Half-open sampling range `[min, max)`, validated once so that sampling
/// itself has no failure path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateBounds {
    min: f64,
    max: f64,
}

impl RateBounds {
    pub fn new(min: f64, max: f64) -> Result<Self, ConfigError> {
        if min.is_finite() && max.is_finite() && min < max && (max - min).is_finite() {
            Ok(Self { min, max })
        } else {
            Err(ConfigError::RateBounds { min, max })
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}

/// Fixed, ordered set of simulated sources plus the generator that drives them.
///
/// The generator is seeded once at construction and reused for every cycle.
#[derive(Debug)]
pub struct SourceSet<R = ChaCha8Rng> {
    sources: Vec<DataSource>,
    rng: R,
}

impl SourceSet<ChaCha8Rng> {
    /// Builds `count` sources named `Conn-1 .. Conn-count`, seeded from OS entropy.
    pub fn create(count: usize) -> Result<Self, ConfigError> {
        Self::with_rng(count, ChaCha8Rng::from_entropy())
    }
}

impl<R: Rng> SourceSet<R> {
    pub fn with_rng(count: usize, rng: R) -> Result<Self, ConfigError> {
        if count == 0 {
            return Err(ConfigError::EmptySourceSet(count));
        }
        let sources = (1..=count)
            .map(|n| DataSource::new(format!("Conn-{n}"), 0.0))
            .collect();
        Ok(Self { sources, rng })
    }

    /// Overwrites every source with an independent uniform draw.
    pub fn sample_all(&mut self, bounds: &RateBounds) {
        let dist = Uniform::new(bounds.min, bounds.max);
        for source in &mut self.sources {
            source.value = dist.sample(&mut self.rng);
        }
    }

    pub fn sources(&self) -> &[DataSource] {
        &self.sources
    }

    pub fn iter(&self) -> impl Iterator<Item = &DataSource> {
        self.sources.iter()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(count: usize) -> SourceSet {
        SourceSet::with_rng(count, ChaCha8Rng::seed_from_u64(7)).unwrap()
    }

    #[test]
    fn create_names_sources_in_order() {
        for n in [1, 2, 5, 17] {
            let set = SourceSet::create(n).unwrap();
            assert_eq!(set.len(), n);
            for (i, source) in set.iter().enumerate() {
                assert_eq!(source.id(), format!("Conn-{}", i + 1));
                assert_eq!(source.value, 0.0);
            }
        }
    }

    #[test]
    fn create_rejects_empty_set() {
        assert_eq!(
            SourceSet::create(0).unwrap_err(),
            ConfigError::EmptySourceSet(0)
        );
    }

    #[test]
    fn rate_bounds_reject_degenerate_ranges() {
        assert!(RateBounds::new(1000.0, 5000.0).is_ok());
        assert!(RateBounds::new(0.0, 1.0).is_ok());
        for (min, max) in [
            (5000.0, 1000.0),
            (10.0, 10.0),
            (f64::NAN, 1.0),
            (0.0, f64::INFINITY),
            (f64::MIN, f64::MAX),
        ] {
            assert!(RateBounds::new(min, max).is_err(), "[{min}, {max}] accepted");
        }
    }

    #[test]
    fn samples_stay_within_bounds() {
        let bounds = RateBounds::new(1000.0, 5000.0).unwrap();
        let mut set = seeded(5);
        for _ in 0..200 {
            set.sample_all(&bounds);
            for source in set.iter() {
                assert!(source.value >= 1000.0 && source.value < 5000.0);
            }
        }
    }

    #[test]
    fn samples_vary_across_cycles() {
        let bounds = RateBounds::new(1000.0, 5000.0).unwrap();
        let mut set = SourceSet::create(5).unwrap();
        let mut seen = Vec::new();
        for _ in 0..20 {
            set.sample_all(&bounds);
            seen.push(set.sources()[0].value);
        }
        assert!(seen.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn sources_draw_independently() {
        let bounds = RateBounds::new(1000.0, 5000.0).unwrap();
        let mut set = seeded(5);
        set.sample_all(&bounds);
        let first = set.sources()[0].value;
        assert!(set.iter().skip(1).any(|s| s.value != first));
    }

    #[test]
    fn same_seed_gives_same_sequence() {
        let bounds = RateBounds::new(1000.0, 5000.0).unwrap();
        let mut a = seeded(3);
        let mut b = seeded(3);
        for _ in 0..5 {
            a.sample_all(&bounds);
            b.sample_all(&bounds);
            assert_eq!(a.sources(), b.sources());
        }
    }

    #[test]
    fn generator_is_not_reseeded_between_calls() {
        let bounds = RateBounds::new(1000.0, 5000.0).unwrap();
        let mut set = seeded(1);
        set.sample_all(&bounds);
        let first = set.sources()[0].value;
        set.sample_all(&bounds);
        assert_ne!(set.sources()[0].value, first);
    }
}
