//! Run command implementation
//!
//! Generates events on the rayon pool, finalises the merged moments and
//! writes the summary as a table, JSON or CSV.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use clap::ValueEnum;
use nudyn_core::{MomentsAccumulator, MomentsSummary};
use nudyn_engine::sim::{ParallelRunner, TracingRecorder};
use serde::Serialize;
use tracing::info;

use crate::config::NudynConfig;
use crate::Result;

/// Output format for the summary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
    /// One CSV header plus one row
    Csv,
}

/// Everything reported for one run.
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    /// Configuration label.
    pub label: String,
    /// Master seed used.
    pub seed: u64,
    /// Worker count.
    pub workers: usize,
    /// Finalised moments.
    pub summary: &'a MomentsSummary,
}

/// Flat CSV record; undefined ratios are left empty.
#[derive(Debug, Serialize)]
struct SummaryRow<'a> {
    label: &'a str,
    seed: u64,
    workers: usize,
    n_events: u64,
    k_average: f64,
    k0_average: f64,
    k0s_average: f64,
    kc_average: f64,
    binomial_k_average: f64,
    dcc_k_average: f64,
    kc_k0_average: f64,
    kc_k0s_average: f64,
    r_00: Option<f64>,
    r_0s0s: Option<f64>,
    r_cc: Option<f64>,
    r_c0: Option<f64>,
    r_c0s: Option<f64>,
    nu_dyn_ch0: Option<f64>,
    nu_dyn_ch0s: Option<f64>,
}

impl<'a> From<&'a RunReport<'a>> for SummaryRow<'a> {
    fn from(report: &'a RunReport<'a>) -> Self {
        let summary = report.summary;
        Self {
            label: &report.label,
            seed: report.seed,
            workers: report.workers,
            n_events: summary.n_events(),
            k_average: summary.total.k.average,
            k0_average: summary.total.k0.average,
            k0s_average: summary.total.k0s.average,
            kc_average: summary.total.kc.average,
            binomial_k_average: summary.binomial.k.average,
            dcc_k_average: summary.dcc.k.average,
            kc_k0_average: summary.kc_k0_average,
            kc_k0s_average: summary.kc_k0s_average,
            r_00: summary.r_00().ok(),
            r_0s0s: summary.r_0s0s().ok(),
            r_cc: summary.r_cc().ok(),
            r_c0: summary.r_c0().ok(),
            r_c0s: summary.r_c0s().ok(),
            nu_dyn_ch0: summary.nu_dyn_ch0().ok(),
            nu_dyn_ch0s: summary.nu_dyn_ch0s().ok(),
        }
    }
}

/// Run the run command
pub fn run(config: &NudynConfig, format: OutputFormat, output: Option<&Path>) -> Result<()> {
    config.validate()?;
    let params = config.generator_params()?;
    let sim_config = config.simulation_config()?;
    let workers = sim_config.workers();

    info!("Starting simulation...");
    info!("  Configuration: {}", params.label());
    info!("  Events: {}", sim_config.n_events());
    info!("  Workers: {}", workers);

    let runner = ParallelRunner::new(params, sim_config);
    let (mut moments, seed): (MomentsAccumulator, u64) = if config.run.debug {
        let outcome = runner.run_with(|_| TracingRecorder::new());
        (outcome.moments, outcome.seed)
    } else {
        let outcome = runner.run();
        (outcome.moments, outcome.seed)
    };
    info!(seed, "Replay with --seed {}", seed);

    let summary = moments.finalize()?;
    let report = RunReport {
        label: params.label(),
        seed,
        workers,
        summary,
    };

    match output {
        Some(path) => {
            let mut file = File::create(path)?;
            write_report(&report, format, &mut file)?;
            info!("Summary written to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_report(&report, format, &mut handle)?;
        }
    }

    info!("Simulation complete");
    Ok(())
}

/// Writes `report` to `out` in `format`.
pub fn write_report<W: Write>(
    report: &RunReport<'_>,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    match format {
        OutputFormat::Table => render_table(report, out)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(&mut *out);
            writer.serialize(SummaryRow::from(report))?;
            writer.flush()?;
        }
    }
    Ok(())
}

fn render_table<W: Write>(report: &RunReport<'_>, out: &mut W) -> io::Result<()> {
    let summary = report.summary;

    writeln!(out, "\n{} (seed {}, {} events)", report.label, report.seed, summary.n_events())?;
    writeln!(out, "┌────────────┬────────────┬────────────┬────────────┬────────────┐")?;
    writeln!(out, "│ Category   │ <k>        │ <k0>       │ <k0s>      │ <kc>       │")?;
    writeln!(out, "├────────────┼────────────┼────────────┼────────────┼────────────┤")?;
    for (name, category) in [
        ("Total", &summary.total),
        ("Binomial", &summary.binomial),
        ("DCC", &summary.dcc),
    ] {
        writeln!(
            out,
            "│ {:<10} │ {:>10.4} │ {:>10.4} │ {:>10.4} │ {:>10.4} │",
            name,
            category.k.average,
            category.k0.average,
            category.k0s.average,
            category.kc.average
        )?;
    }
    writeln!(out, "└────────────┴────────────┴────────────┴────────────┴────────────┘")?;

    writeln!(out, "┌────────────┬──────────────┐")?;
    writeln!(out, "│ Ratio      │ Value        │")?;
    writeln!(out, "├────────────┼──────────────┤")?;
    for field in nudyn_core::RatioField::ALL {
        let value = match summary.ratio(field) {
            Ok(value) => format!("{:>12.6}", value),
            Err(_) => format!("{:>12}", "undefined"),
        };
        writeln!(out, "│ {:<10} │ {} │", field.name(), value)?;
    }
    writeln!(out, "└────────────┴──────────────┘")
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn finalised(min: f64, max: f64, dcc: f64) -> MomentsAccumulator {
        let mut config = NudynConfig::default();
        config.generator.min_mult = min;
        config.generator.max_mult = max;
        config.generator.dcc_fraction = dcc;
        config.run.n_events = 500;
        config.run.seed = Some(11);
        config.run.workers = 2;

        let runner = ParallelRunner::new(
            config.generator_params().unwrap(),
            config.simulation_config().unwrap(),
        );
        let mut moments = runner.run().moments;
        moments.finalize().unwrap();
        moments
    }

    fn render(moments: &MomentsAccumulator, format: OutputFormat) -> String {
        let report = RunReport {
            label: "test".to_string(),
            seed: 11,
            workers: 2,
            summary: moments.summary().unwrap(),
        };
        let mut buffer = Vec::new();
        write_report(&report, format, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_json_output_round_trips() {
        let moments = finalised(1.0, 200.0, 0.5);
        let json: serde_json::Value =
            serde_json::from_str(&render(&moments, OutputFormat::Json)).unwrap();

        assert_eq!(json["seed"], 11);
        assert_eq!(json["summary"]["n_events"], 500);
        let summary = moments.summary().unwrap();
        assert_relative_eq!(
            json["summary"]["nu_dyn_ch0"].as_f64().unwrap(),
            summary.nu_dyn_ch0().unwrap(),
            max_relative = 1e-12
        );
        assert_relative_eq!(
            json["summary"]["total"]["k0"]["average"].as_f64().unwrap(),
            summary.total.k0.average,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_json_writes_null_for_undefined_ratios() {
        let moments = finalised(0.0, 0.5, 0.5);
        let json: serde_json::Value =
            serde_json::from_str(&render(&moments, OutputFormat::Json)).unwrap();

        assert!(json["summary"]["r_00"].is_null());
        assert!(json["summary"]["nu_dyn_ch0s"].is_null());
        assert_relative_eq!(json["summary"]["total"]["k"]["average"].as_f64().unwrap(), 0.0);
    }

    #[test]
    fn test_csv_output_has_header_and_row() {
        let moments = finalised(1.0, 200.0, 0.5);
        let text = render(&moments, OutputFormat::Csv);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("label,seed,workers,n_events,"));
        assert!(lines[0].ends_with("nu_dyn_ch0,nu_dyn_ch0s"));
        assert!(lines[1].starts_with("test,11,2,500,"));
    }

    #[test]
    fn test_csv_leaves_undefined_ratios_empty() {
        let moments = finalised(0.0, 0.5, 0.5);
        let text = render(&moments, OutputFormat::Csv);
        let row = text.lines().nth(1).unwrap();
        assert!(row.ends_with(",,,,,,,"));
    }

    #[test]
    fn test_table_marks_undefined_ratios() {
        let moments = finalised(0.0, 0.5, 0.5);
        let table = render(&moments, OutputFormat::Table);
        assert!(table.contains("undefined"));
        assert!(table.contains("nuDyn_ch0s"));
        assert!(table.contains("Binomial"));
    }

    #[test]
    fn test_run_writes_output_file() {
        let path = std::env::temp_dir().join(format!("nudyn_run_{}.json", std::process::id()));
        let mut config = NudynConfig::default();
        config.run.n_events = 200;
        config.run.seed = Some(5);

        run(&config, OutputFormat::Json, Some(&path)).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["label"], "Kaonf=0.30_DCCf=0.90_1M200");
        assert_eq!(json["seed"], 5);
        std::fs::remove_file(&path).unwrap();
    }
}
