use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rust_decimal::Decimal;
use tracing::{debug, info};

use irrf_cli::app::{self, ManualInput, OutputFormat, ReportKind};
use irrf_cli::logging;
use irrf_cli::utils::parse_decimal;
use irrf_core::{WithholdingCalculator, WithholdingRules};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Monthly IRRF withholding: 2025 rules against the 2026 reform, itemized
/// against simplified.
///
/// Without `--gross` or `--scenarios` the two built-in demonstration
/// paychecks are used.
#[derive(Debug, Parser)]
#[command(name = "irrf", version)]
struct Cli {
    /// Gross monthly salary.
    #[arg(long, value_parser = parse_decimal, conflicts_with = "scenarios")]
    gross: Option<Decimal>,

    /// Private pension contribution.
    #[arg(long, value_parser = parse_decimal, requires = "gross")]
    pension: Option<Decimal>,

    /// Pension contribution as a fraction of gross (e.g. `0.12`).
    #[arg(long, value_parser = parse_decimal, requires = "gross", conflicts_with = "pension")]
    pension_rate: Option<Decimal>,

    /// Health-plan expense (itemized method only).
    #[arg(long, value_parser = parse_decimal, requires = "gross")]
    health: Option<Decimal>,

    /// Number of dependents (itemized method only).
    #[arg(long, requires = "gross")]
    dependents: Option<u32>,

    /// CSV file with one scenario per row.
    #[arg(long)]
    scenarios: Option<PathBuf>,

    /// TOML file overriding the statutory law tables.
    #[arg(long)]
    rules: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = ReportKind::All)]
    report: ReportKind,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log filter (`debug`, `irrf_core=trace`, ...). Overrides `RUST_LOG`.
    #[arg(long)]
    log_level: Option<String>,

    /// Append logs to this file as well as stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.log_level.as_deref(), cli.log_file.as_deref())?;
    debug!(?cli, "arguments parsed");

    let rules = match &cli.rules {
        Some(path) => irrf_data::load_rules_from_file(path)
            .with_context(|| format!("failed to load rules from {}", path.display()))?,
        None => WithholdingRules::statutory(),
    };
    let calculator = WithholdingCalculator::new(rules).context("invalid withholding rules")?;

    let scenarios = if let Some(path) = &cli.scenarios {
        irrf_data::load_from_file(path)
            .with_context(|| format!("failed to load scenarios from {}", path.display()))?
    } else if let Some(gross_salary) = cli.gross {
        let manual = ManualInput {
            gross_salary,
            pension_contribution: cli.pension,
            pension_rate: cli.pension_rate,
            health_expense: cli.health.unwrap_or_default(),
            dependents: cli.dependents.unwrap_or_default(),
        };
        vec![manual.into_scenario().context("invalid command-line input")?]
    } else {
        info!("no input given, running demonstration scenarios");
        app::demo_scenarios().context("invalid demonstration scenario")?
    };

    let output = app::run(&calculator, &scenarios, cli.report, cli.format)?;
    println!("{output}");

    Ok(())
}
