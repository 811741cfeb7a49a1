//! Run configuration management.
//!
//! Settings are resolved in three layers, later layers overriding earlier ones:
//!
//! 1. a TOML file (default `nudyn.toml`)
//! 2. `NUDYN_*` environment variables
//! 3. command-line flags
//!
//! ```toml
//! [generator]
//! kaon_fraction = 0.3
//! dcc_fraction = 0.9
//! min_mult = 1.0
//! max_mult = 200.0
//! rounding = "truncate"
//!
//! [run]
//! n_events = 1000
//! seed = 42
//! workers = 4
//! log_level = "info"
//! debug = false
//! ```

use std::path::{Path, PathBuf};

use nudyn_core::ConfigError;
use nudyn_engine::generator::{GeneratorParams, PartitionRounding};
use nudyn_engine::sim::SimulationConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Path read when no `--config` flag is given.
pub const DEFAULT_CONFIG_PATH: &str = "nudyn.toml";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Generator settings (`[generator]` table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorSection {
    /// Binomial probability of a trial being a kaon.
    pub kaon_fraction: f64,
    /// Share of kaons assigned to the DCC population.
    pub dcc_fraction: f64,
    /// Lower bound of the centrality draw.
    pub min_mult: f64,
    /// Upper bound of the centrality draw.
    pub max_mult: f64,
    /// Rounding of the DCC share.
    pub rounding: PartitionRounding,
}

impl Default for GeneratorSection {
    fn default() -> Self {
        Self {
            kaon_fraction: 0.3,
            dcc_fraction: 0.9,
            min_mult: 1.0,
            max_mult: 200.0,
            rounding: PartitionRounding::default(),
        }
    }
}

/// Run settings (`[run]` table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunSection {
    /// Number of events to generate.
    pub n_events: u64,
    /// Master seed; drawn from entropy when absent.
    pub seed: Option<u64>,
    /// Worker count; `0` uses every logical CPU.
    pub workers: usize,
    /// Fallback log level when `RUST_LOG` is unset.
    pub log_level: String,
    /// Log every generated event.
    pub debug: bool,
}

impl Default for RunSection {
    fn default() -> Self {
        Self {
            n_events: 1_000,
            seed: None,
            workers: 1,
            log_level: "info".to_string(),
            debug: false,
        }
    }
}

/// Complete CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NudynConfig {
    /// Generator settings.
    pub generator: GeneratorSection,
    /// Run settings.
    pub run: RunSection,
}

/// Errors from reading or overriding the configuration file.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// An explicitly named file does not exist.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema.
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// An environment variable could not be parsed.
    #[error("Invalid value '{value}' for {name}")]
    InvalidEnv {
        /// Variable name.
        name: &'static str,
        /// Raw value.
        value: String,
    },

    /// Log level outside `trace|debug|info|warn|error`.
    #[error("Invalid log_level '{0}'. Valid values: trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

impl NudynConfig {
    /// Loads configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigFileError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigFileError> {
        Ok(toml::from_str(content)?)
    }

    /// Loads `path`, falling back to defaults when an implicit path is absent.
    ///
    /// A missing file is an error only when it was named explicitly.
    pub fn load_or_default(path: &Path, explicit: bool) -> Result<Self, ConfigFileError> {
        if path.exists() {
            Self::load(path)
        } else if explicit {
            Err(ConfigFileError::NotFound(path.to_path_buf()))
        } else {
            Ok(Self::default())
        }
    }

    /// Applies `NUDYN_*` environment variable overrides.
    pub fn with_env_override(self) -> Result<Self, ConfigFileError> {
        self.with_overrides_from(|name| std::env::var(name).ok())
    }

    /// Applies overrides looked up through `lookup`.
    ///
    /// Recognised names are `NUDYN_SEED`, `NUDYN_EVENTS`, `NUDYN_WORKERS` and
    /// `NUDYN_LOG_LEVEL`.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Result<Self, ConfigFileError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(seed) = lookup("NUDYN_SEED") {
            self.run.seed = Some(parse_env("NUDYN_SEED", seed)?);
        }
        if let Some(n_events) = lookup("NUDYN_EVENTS") {
            self.run.n_events = parse_env("NUDYN_EVENTS", n_events)?;
        }
        if let Some(workers) = lookup("NUDYN_WORKERS") {
            self.run.workers = parse_env("NUDYN_WORKERS", workers)?;
        }
        if let Some(log_level) = lookup("NUDYN_LOG_LEVEL") {
            self.run.log_level = log_level;
        }
        Ok(self)
    }

    /// Validates the log level.
    ///
    /// Generator and run settings are validated by their builders.
    pub fn validate(&self) -> Result<(), ConfigFileError> {
        if LOG_LEVELS.contains(&self.run.log_level.to_lowercase().as_str()) {
            Ok(())
        } else {
            Err(ConfigFileError::InvalidLogLevel(self.run.log_level.clone()))
        }
    }

    /// Builds validated generator parameters.
    pub fn generator_params(&self) -> Result<GeneratorParams, ConfigError> {
        let generator = &self.generator;
        GeneratorParams::builder()
            .multiplicity(generator.min_mult, generator.max_mult)
            .kaon_fraction(generator.kaon_fraction)
            .dcc_fraction(generator.dcc_fraction)
            .rounding(generator.rounding)
            .build()
    }

    /// Builds a validated simulation configuration.
    pub fn simulation_config(&self) -> Result<SimulationConfig, ConfigError> {
        SimulationConfig::builder()
            .n_events(self.run.n_events)
            .maybe_seed(self.run.seed)
            .workers(self.resolved_workers())
            .build()
    }

    /// Worker count with `0` resolved to the number of logical CPUs.
    pub fn resolved_workers(&self) -> usize {
        match self.run.workers {
            0 => num_cpus::get().max(1),
            workers => workers,
        }
    }
}

fn parse_env<T: std::str::FromStr>(
    name: &'static str,
    value: String,
) -> Result<T, ConfigFileError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigFileError::InvalidEnv { name, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = NudynConfig::default();
        assert_eq!(config.generator.kaon_fraction, 0.3);
        assert_eq!(config.generator.dcc_fraction, 0.9);
        assert_eq!(config.run.n_events, 1_000);
        assert_eq!(config.run.workers, 1);
        assert!(config.validate().is_ok());
        assert!(config.generator_params().is_ok());
        assert!(config.simulation_config().is_ok());
    }

    #[test]
    fn test_parse_full_file() {
        let config = NudynConfig::from_toml(
            r#"
            [generator]
            kaon_fraction = 0.25
            dcc_fraction = 0.5
            min_mult = 800.0
            max_mult = 1000.0
            rounding = "stochastic"

            [run]
            n_events = 5000
            seed = 7
            workers = 3
            log_level = "debug"
            debug = true
            "#,
        )
        .unwrap();

        assert_eq!(config.generator.rounding, PartitionRounding::Stochastic);
        assert_eq!(config.generator.max_mult, 1000.0);
        assert_eq!(config.run.seed, Some(7));
        assert!(config.run.debug);

        let params = config.generator_params().unwrap();
        assert_eq!(params.label(), "Kaonf=0.25_DCCf=0.50_800M1000");
        assert_eq!(config.simulation_config().unwrap().workers(), 3);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = NudynConfig::from_toml("[run]\nn_events = 10\n").unwrap();
        assert_eq!(config.run.n_events, 10);
        assert_eq!(config.generator, GeneratorSection::default());
        assert_eq!(config.run.log_level, "info");
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = NudynConfig::from_toml("[generator]\nkaon_fraktion = 0.3\n");
        assert!(matches!(result, Err(ConfigFileError::Parse(_))));
    }

    #[test]
    fn test_unknown_rounding_rejected() {
        let result = NudynConfig::from_toml("[generator]\nrounding = \"ceil\"\n");
        assert!(matches!(result, Err(ConfigFileError::Parse(_))));
    }

    #[test]
    fn test_missing_implicit_file_uses_defaults() {
        let path = Path::new("definitely/not/here/nudyn.toml");
        let config = NudynConfig::load_or_default(path, false).unwrap();
        assert_eq!(config, NudynConfig::default());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let path = Path::new("definitely/not/here/nudyn.toml");
        let result = NudynConfig::load_or_default(path, true);
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_env_override() {
        let config = NudynConfig::default()
            .with_overrides_from(env(&[
                ("NUDYN_SEED", "99"),
                ("NUDYN_EVENTS", "250"),
                ("NUDYN_WORKERS", "2"),
                ("NUDYN_LOG_LEVEL", "warn"),
            ]))
            .unwrap();

        assert_eq!(config.run.seed, Some(99));
        assert_eq!(config.run.n_events, 250);
        assert_eq!(config.run.workers, 2);
        assert_eq!(config.run.log_level, "warn");
    }

    #[test]
    fn test_env_override_rejects_garbage() {
        let result = NudynConfig::default().with_overrides_from(env(&[("NUDYN_EVENTS", "many")]));
        match result {
            Err(ConfigFileError::InvalidEnv { name, value }) => {
                assert_eq!(name, "NUDYN_EVENTS");
                assert_eq!(value, "many");
            }
            other => panic!("Expected InvalidEnv, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_log_levels() {
        for level in ["trace", "debug", "info", "warn", "error", "INFO"] {
            let mut config = NudynConfig::default();
            config.run.log_level = level.to_string();
            assert!(config.validate().is_ok(), "Log level '{}' should be valid", level);
        }

        let mut config = NudynConfig::default();
        config.run.log_level = "loud".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigFileError::InvalidLogLevel(_))
        ));
    }

    #[test]
    fn test_invalid_generator_settings_surface_config_error() {
        let mut config = NudynConfig::default();
        config.generator.min_mult = 300.0;
        assert!(matches!(
            config.generator_params(),
            Err(ConfigError::InvalidMultiplicityRange { .. })
        ));

        let mut config = NudynConfig::default();
        config.run.n_events = 0;
        assert!(matches!(
            config.simulation_config(),
            Err(ConfigError::InvalidEventCount(0))
        ));
    }

    #[test]
    fn test_zero_workers_resolves_to_cpus() {
        let mut config = NudynConfig::default();
        config.run.workers = 0;
        assert!(config.resolved_workers() >= 1);
        assert!(config.simulation_config().is_ok());
    }
}
