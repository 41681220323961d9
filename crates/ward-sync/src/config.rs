//! Counter run configuration.

use std::fmt;
use std::str::FromStr;

use ward_core::ConfigError;

/// Which [`SharedCounter`](crate::SharedCounter) a run uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CounterStrategy {
    /// [`AtomicCounter`](crate::AtomicCounter): one `fetch_add` per adjustment.
    #[default]
    Atomic,
    /// [`MutexCounter`](crate::MutexCounter): lock, update, unlock.
    Mutex,
}

impl fmt::Display for CounterStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Atomic => write!(f, "atomic"),
            Self::Mutex => write!(f, "mutex"),
        }
    }
}

impl FromStr for CounterStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "atomic" => Ok(Self::Atomic),
            "mutex" => Ok(Self::Mutex),
            other => Err(format!(
                "unknown counter strategy '{other}' (expected atomic or mutex)"
            )),
        }
    }
}

/// Configuration for [`run_balanced`](crate::run_balanced).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CounterConfig {
    /// Adjustments applied by each task. Default: 100 000.
    pub iterations: u64,
    /// Number of (incrementer, decrementer) task pairs. Default: 1.
    pub pairs: usize,
    /// Counter implementation. Default: [`CounterStrategy::Atomic`].
    pub strategy: CounterStrategy,
}

impl CounterConfig {
    /// Default adjustments per task.
    pub const DEFAULT_ITERATIONS: u64 = 100_000;

    /// Default task pair count.
    pub const DEFAULT_PAIRS: usize = 1;

    /// Create a config with `iterations` per task and default pairs/strategy.
    pub fn new(iterations: u64) -> Self {
        Self {
            iterations,
            pairs: Self::DEFAULT_PAIRS,
            strategy: CounterStrategy::default(),
        }
    }

    /// Set the number of task pairs.
    pub fn with_pairs(mut self, pairs: usize) -> Self {
        self.pairs = pairs;
        self
    }

    /// Set the counter strategy.
    pub fn with_strategy(mut self, strategy: CounterStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Check structural invariants.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ZeroPairs`] if `pairs == 0`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pairs == 0 {
            return Err(ConfigError::ZeroPairs);
        }
        Ok(())
    }
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ITERATIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_race_scenario() {
        let config = CounterConfig::default();
        assert_eq!(config.iterations, 100_000);
        assert_eq!(config.pairs, 1);
        assert_eq!(config.strategy, CounterStrategy::Atomic);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_pairs_rejected() {
        let config = CounterConfig::default().with_pairs(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroPairs));
    }

    #[test]
    fn zero_iterations_is_valid() {
        assert!(CounterConfig::new(0).validate().is_ok());
    }

    #[test]
    fn strategy_parses_and_displays() {
        for s in [CounterStrategy::Atomic, CounterStrategy::Mutex] {
            assert_eq!(s.to_string().parse::<CounterStrategy>(), Ok(s));
        }
        assert!("spin".parse::<CounterStrategy>().is_err());
    }
}
