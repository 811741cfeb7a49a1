//! Validate command implementation
//!
//! Resolves the configuration exactly as `run` would and reports it without
//! generating any events.

use tracing::info;

use crate::config::NudynConfig;
use crate::Result;

/// Run the validate command
pub fn run(config: &NudynConfig) -> Result<()> {
    config.validate()?;
    let params = config.generator_params()?;
    let sim_config = config.simulation_config()?;

    info!(config = %params.label(), "Configuration is valid");

    println!("Configuration: {}", params.label());
    println!("  Kaon fraction:  {}", params.kaon_fraction().value());
    println!("  DCC fraction:   {}", params.dcc_fraction());
    println!(
        "  Multiplicity:   [{}, {})",
        params.min_mult(),
        params.max_mult()
    );
    println!("  Rounding:       {:?}", params.rounding());
    println!("  Events:         {}", sim_config.n_events());
    println!("  Workers:        {}", sim_config.workers());
    match sim_config.seed() {
        Some(seed) => println!("  Seed:           {}", seed),
        None => println!("  Seed:           (entropy)"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CliError;

    #[test]
    fn test_default_config_validates() {
        assert!(run(&NudynConfig::default()).is_ok());
    }

    #[test]
    fn test_invalid_kaon_fraction_rejected() {
        let mut config = NudynConfig::default();
        config.generator.kaon_fraction = 1.0;
        assert!(matches!(run(&config), Err(CliError::Config(_))));
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let mut config = NudynConfig::default();
        config.run.log_level = "chatty".to_string();
        assert!(matches!(run(&config), Err(CliError::ConfigFile(_))));
    }
}
