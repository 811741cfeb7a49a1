//! nudyn CLI - Kaon DCC Toy Model Simulations
//!
//! Operational entry point for generating kaon events and computing the
//! nuDyn fluctuation observables.
//!
//! # Commands
//!
//! - `nudyn run` - Generate events and report the moments summary
//! - `nudyn validate` - Resolve and check the configuration without running
//!
//! # Configuration
//!
//! Settings come from `nudyn.toml` (or `--config <file>`), then `NUDYN_*`
//! environment variables, then command-line flags.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use nudyn_engine::generator::PartitionRounding;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use commands::run::OutputFormat;
use config::{NudynConfig, DEFAULT_CONFIG_PATH};

/// Kaon DCC toy model CLI
#[derive(Parser)]
#[command(name = "nudyn")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output (forces debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path [default: nudyn.toml]
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate events and report the moments summary
    Run {
        #[command(flatten)]
        overrides: Overrides,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Write the summary to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Resolve and check the configuration without generating events
    Validate {
        #[command(flatten)]
        overrides: Overrides,
    },
}

/// Rounding of the DCC share.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum RoundingArg {
    Truncate,
    Nearest,
    Stochastic,
}

impl From<RoundingArg> for PartitionRounding {
    fn from(arg: RoundingArg) -> Self {
        match arg {
            RoundingArg::Truncate => PartitionRounding::Truncate,
            RoundingArg::Nearest => PartitionRounding::Nearest,
            RoundingArg::Stochastic => PartitionRounding::Stochastic,
        }
    }
}

/// Flags overriding file and environment settings.
#[derive(Args, Debug, Default)]
struct Overrides {
    /// Binomial probability of a trial being a kaon, in (0, 1)
    #[arg(long)]
    kaon_fraction: Option<f64>,

    /// Share of kaons produced by the DCC source, in [0, 1]
    #[arg(long)]
    dcc_fraction: Option<f64>,

    /// Lower bound of the centrality draw
    #[arg(long)]
    min_mult: Option<f64>,

    /// Upper bound of the centrality draw
    #[arg(long)]
    max_mult: Option<f64>,

    /// Rounding of the DCC share
    #[arg(long, value_enum)]
    rounding: Option<RoundingArg>,

    /// Number of events
    #[arg(short = 'n', long)]
    events: Option<u64>,

    /// Master seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Worker threads (0 = all logical CPUs)
    #[arg(short, long)]
    workers: Option<usize>,

    /// Log every generated event
    #[arg(long)]
    debug: bool,
}

impl Overrides {
    fn apply(&self, mut config: NudynConfig) -> NudynConfig {
        let generator = &mut config.generator;
        if let Some(kaon_fraction) = self.kaon_fraction {
            generator.kaon_fraction = kaon_fraction;
        }
        if let Some(dcc_fraction) = self.dcc_fraction {
            generator.dcc_fraction = dcc_fraction;
        }
        if let Some(min_mult) = self.min_mult {
            generator.min_mult = min_mult;
        }
        if let Some(max_mult) = self.max_mult {
            generator.max_mult = max_mult;
        }
        if let Some(rounding) = self.rounding {
            generator.rounding = rounding.into();
        }

        let run = &mut config.run;
        if let Some(events) = self.events {
            run.n_events = events;
        }
        if self.seed.is_some() {
            run.seed = self.seed;
        }
        if let Some(workers) = self.workers {
            run.workers = workers;
        }
        run.debug |= self.debug;
        config
    }
}

fn resolve_config(path: Option<&Path>, overrides: &Overrides) -> Result<NudynConfig> {
    let explicit = path.is_some();
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));
    let config = NudynConfig::load_or_default(path, explicit)?.with_env_override()?;
    Ok(overrides.apply(config))
}

fn init_tracing(config: &NudynConfig, verbose: bool) {
    let filter = if verbose || config.run.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.run.log_level.to_lowercase()))
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let overrides = match &cli.command {
        Commands::Run { overrides, .. } | Commands::Validate { overrides } => overrides,
    };
    let config = resolve_config(cli.config.as_deref(), overrides)?;

    init_tracing(&config, cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }
    debug!(?config, "Resolved configuration");

    match &cli.command {
        Commands::Run { format, output, .. } => {
            commands::run::run(&config, *format, output.as_deref())
        }
        Commands::Validate { .. } => commands::validate::run(&config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from([
            "nudyn",
            "run",
            "--dcc-fraction",
            "0.25",
            "--rounding",
            "stochastic",
            "-n",
            "5000",
            "--seed",
            "3",
            "--format",
            "json",
        ]);

        let Commands::Run { overrides, format, .. } = cli.command else {
            panic!("Expected run command");
        };
        let config = overrides.apply(NudynConfig::default());

        assert_eq!(format, OutputFormat::Json);
        assert_eq!(config.generator.dcc_fraction, 0.25);
        assert_eq!(config.generator.kaon_fraction, 0.3);
        assert_eq!(config.generator.rounding, PartitionRounding::Stochastic);
        assert_eq!(config.run.n_events, 5_000);
        assert_eq!(config.run.seed, Some(3));
    }

    #[test]
    fn test_absent_flags_keep_config() {
        let mut base = NudynConfig::default();
        base.run.seed = Some(8);
        base.run.debug = true;

        let config = Overrides::default().apply(base.clone());
        assert_eq!(config, base);
    }

    #[test]
    fn test_explicit_missing_config_is_error() {
        let result = resolve_config(
            Some(Path::new("no/such/dir/custom.toml")),
            &Overrides::default(),
        );
        assert!(matches!(result, Err(CliError::ConfigFile(_))));
    }
}
