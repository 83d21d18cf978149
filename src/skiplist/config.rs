use std::f64;

const DEFAULT_MAX_LEVEL: usize = 32;
const DEFAULT_PROBABILITY: f64 = 0.5;
const MAX_LEVEL_LIMIT: usize = 64;

/// Tuning parameters of a `SkipMap`.
///
/// # Examples
/// ```
/// use ordered_maps::skiplist::{Config, SkipMap};
///
/// let config = Config {
///     max_level: 16,
///     probability: 0.25,
///     seed: Some([1, 2, 3, 4]),
/// };
/// let mut map = SkipMap::with_config(config);
/// map.insert(1, 1);
/// assert_eq!(map.get(&1), Some(&1));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    /// The number of levels of the list. Nodes are assigned a level in `[0, max_level)`. Values
    /// are clamped to `[1, 64]`, since the head keeps one link per level.
    pub max_level: usize,
    /// The probability that a node which participates in a level also participates in the next
    /// one. Values are clamped to `[0, 1)`.
    pub probability: f64,
    /// Seed of the generator that draws node levels. A fixed seed makes the shape of the list
    /// reproducible, while `None` seeds the generator from the operating system. The seed must
    /// not be all zeros.
    pub seed: Option<[u32; 4]>,
}

impl Config {
    pub(crate) fn max_level(&self) -> usize {
        self.max_level.max(1).min(MAX_LEVEL_LIMIT)
    }

    pub(crate) fn probability(&self) -> f64 {
        if self.probability.is_nan() || self.probability < 0.0 {
            0.0
        } else if self.probability >= 1.0 {
            1.0 - f64::EPSILON
        } else {
            self.probability
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_level: DEFAULT_MAX_LEVEL,
            probability: DEFAULT_PROBABILITY,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Config;

    #[test]
    fn test_default() {
        let config = Config::default();
        assert_eq!(config.max_level(), 32);
        assert_eq!(config.probability(), 0.5);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_clamping() {
        let config = Config {
            max_level: 0,
            probability: 1.5,
            seed: None,
        };
        assert_eq!(config.max_level(), 1);
        assert!(config.probability() < 1.0);

        let config = Config {
            probability: -0.5,
            ..Config::default()
        };
        assert_eq!(config.probability(), 0.0);

        let config = Config {
            max_level: usize::MAX,
            ..Config::default()
        };
        assert_eq!(config.max_level(), 64);
    }
}
