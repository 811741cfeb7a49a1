//! Simulation run configuration.

use nudyn_core::ConfigError;

/// Run configuration: how many events, with which seed, on how many workers.
///
/// Use [`SimulationConfigBuilder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use nudyn_engine::sim::SimulationConfig;
///
/// let config = SimulationConfig::builder()
///     .n_events(100_000)
///     .seed(42)
///     .workers(4)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_events(), 100_000);
/// assert_eq!(config.seed(), Some(42));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationConfig {
    n_events: u64,
    seed: Option<u64>,
    workers: usize,
}

impl SimulationConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    /// Number of events requested.
    #[inline]
    pub fn n_events(&self) -> u64 {
        self.n_events
    }

    /// Optional master seed; `None` seeds from entropy.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Number of parallel workers.
    #[inline]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `n_events` is 0
    /// - `workers` is 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_events == 0 {
            return Err(ConfigError::InvalidEventCount(self.n_events));
        }
        if self.workers == 0 {
            return Err(ConfigError::InvalidWorkerCount(self.workers));
        }
        Ok(())
    }

    /// Events assigned to each worker; the first `n_events % workers` take one extra.
    pub fn worker_event_counts(&self) -> Vec<u64> {
        let workers = self.workers as u64;
        let base = self.n_events / workers;
        let extra = self.n_events % workers;
        (0..workers)
            .map(|worker| base + u64::from(worker < extra))
            .collect()
    }
}

/// Builder for [`SimulationConfig`].
#[derive(Clone, Debug)]
pub struct SimulationConfigBuilder {
    n_events: Option<u64>,
    seed: Option<u64>,
    workers: usize,
}

impl Default for SimulationConfigBuilder {
    fn default() -> Self {
        Self {
            n_events: None,
            seed: None,
            workers: 1,
        }
    }
}

impl SimulationConfigBuilder {
    /// Sets the number of events.
    #[inline]
    pub fn n_events(mut self, n_events: u64) -> Self {
        self.n_events = Some(n_events);
        self
    }

    /// Sets the master seed.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets an optional master seed.
    #[inline]
    pub fn maybe_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the number of workers (default 1).
    #[inline]
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `n_events` is not set or the result fails
    /// [`SimulationConfig::validate`].
    pub fn build(self) -> Result<SimulationConfig, ConfigError> {
        let n_events = self.n_events.ok_or(ConfigError::InvalidParameter {
            name: "n_events",
            value: "must be specified".to_string(),
        })?;

        let config = SimulationConfig {
            n_events,
            seed: self.seed,
            workers: self.workers,
        };

        config.validate()?;
        Ok(config)
    }
}
