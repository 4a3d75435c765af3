//! Composition of scenarios, calculator and reports.

use clap::ValueEnum;
use irrf_core::{CalculationError, CalculationInput, Regime, WithholdingCalculator};
use irrf_data::Scenario;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, info};

use crate::report::{ScenarioReport, render_json, render_scenario};

/// Which reports to print for each scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportKind {
    /// Itemized vs simplified under the 2025 rules.
    #[value(name = "compare-2025")]
    Compare2025,
    /// Itemized vs simplified under the 2026 rules.
    #[value(name = "compare-2026")]
    Compare2026,
    /// 2025 vs 2026 for both methods.
    Trend,
    #[default]
    All,
}

impl ReportKind {
    fn includes(
        self,
        other: ReportKind,
    ) -> bool {
        self == ReportKind::All || self == other
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Amounts given on the command line for a single scenario.
#[derive(Debug, Clone, Default)]
pub struct ManualInput {
    pub gross_salary: Decimal,
    pub pension_contribution: Option<Decimal>,
    pub pension_rate: Option<Decimal>,
    pub health_expense: Decimal,
    pub dependents: u32,
}

impl ManualInput {
    /// Builds a scenario. An explicit pension amount wins over a rate; with
    /// neither the pension is zero.
    pub fn into_scenario(self) -> Result<Scenario, CalculationError> {
        let input = match (self.pension_contribution, self.pension_rate) {
            (Some(amount), _) => CalculationInput::new(self.gross_salary, amount),
            (None, Some(rate)) => CalculationInput::with_pension_rate(self.gross_salary, rate),
            (None, None) => CalculationInput::new(self.gross_salary, Decimal::ZERO),
        }?
        .with_health_expense(self.health_expense)?
        .with_dependents(self.dependents);

        Ok(Scenario {
            label: "Command line".to_string(),
            input,
        })
    }
}

/// The two scenarios shown when no input is given.
pub fn demo_scenarios() -> Result<Vec<Scenario>, CalculationError> {
    let october = ManualInput {
        gross_salary: dec!(4161.00),
        pension_contribution: Some(dec!(499.32)),
        health_expense: dec!(145.63),
        ..Default::default()
    };
    let higher = ManualInput {
        gross_salary: dec!(9000.00),
        pension_rate: Some(dec!(0.12)),
        health_expense: dec!(145.63),
        ..Default::default()
    };

    Ok(vec![
        Scenario {
            label: "October 2025 paycheck".to_string(),
            ..october.into_scenario()?
        },
        Scenario {
            label: "Salary R$ 9,000.00 with 12% pension".to_string(),
            ..higher.into_scenario()?
        },
    ])
}

/// Runs the calculations `kind` asks for on one scenario.
pub fn build_report(
    calculator: &WithholdingCalculator,
    scenario: &Scenario,
    kind: ReportKind,
) -> Result<ScenarioReport, CalculationError> {
    let input = &scenario.input;
    debug!(label = %scenario.label, ?kind, "building report");

    let comparison_2025 = kind
        .includes(ReportKind::Compare2025)
        .then(|| calculator.compare(input, Regime::Y2025))
        .transpose()?;
    let comparison_2026 = kind
        .includes(ReportKind::Compare2026)
        .then(|| calculator.compare(input, Regime::Y2026))
        .transpose()?;
    let trend = kind
        .includes(ReportKind::Trend)
        .then(|| calculator.trend(input))
        .transpose()?;

    Ok(ScenarioReport {
        label: scenario.label.clone(),
        input: input.clone(),
        comparison_2025,
        comparison_2026,
        trend,
    })
}

/// Builds every report and renders them in the requested format.
pub fn run(
    calculator: &WithholdingCalculator,
    scenarios: &[Scenario],
    kind: ReportKind,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let reports = scenarios
        .iter()
        .map(|scenario| build_report(calculator, scenario, kind))
        .collect::<Result<Vec<_>, _>>()?;
    info!(count = reports.len(), "scenarios calculated");

    let output = match format {
        OutputFormat::Text => {
            let exemption_limit = calculator.rules().reform.exemption_limit;
            reports
                .iter()
                .map(|report| render_scenario(report, exemption_limit))
                .collect::<String>()
        }
        OutputFormat::Json => render_json(&reports)?,
    };
    Ok(output)
}
