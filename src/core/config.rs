//! Session configuration.
//!
//! The rules of Kaboo are fixed; the only knob is the RNG seed, which makes
//! deals and starting-player draws reproducible.

use serde::{Deserialize, Serialize};

/// Configuration for a `Session`.
///
/// ```
/// use kaboo_engine::core::SessionConfig;
///
/// let config = SessionConfig::seeded(42);
/// assert_eq!(config.resolve_seed(), 42);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// RNG seed. `None` draws one from the thread RNG.
    pub seed: Option<u64>,
}

impl SessionConfig {
    /// Create a configuration with an entropy-derived seed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration with a fixed seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    /// Set the seed (builder pattern).
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The seed to use, drawing a fresh one if none is configured.
    #[must_use]
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}
