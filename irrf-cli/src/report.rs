//! Text and JSON rendering of comparison and trend records.
//!
//! Nothing here decides anything: which method is cheaper, the savings and
//! the tie threshold all come from the core records. Amounts are rounded to
//! the cent only when printed.

use comfy_table::{Attribute, Cell, CellAlignment, Table};
use irrf_core::{
    CalculationInput, CalculationResult, FilingMethod, MethodComparison, MethodTrend,
    PRACTICALLY_EQUAL_THRESHOLD, RegimeTrend,
};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::utils::format_brl;

const WIDTH: usize = 70;
const LABEL_WIDTH: usize = 44;

/// Everything computed for one scenario. Sections the user did not ask for
/// are `None` and left out of the JSON.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub label: String,
    pub input: CalculationInput,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison_2025: Option<MethodComparison>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison_2026: Option<MethodComparison>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<RegimeTrend>,
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn rule(
    out: &mut String,
    ch: char,
) {
    out.extend(std::iter::repeat_n(ch, WIDTH));
    out.push('\n');
}

fn amount_line(
    out: &mut String,
    label: &str,
    value: Decimal,
) {
    out.push_str(&format!(
        "{label:<label_width$}{:>width$}\n",
        format_brl(value),
        label_width = LABEL_WIDTH,
        width = WIDTH - LABEL_WIDTH
    ));
}

fn text_line(
    out: &mut String,
    label: &str,
    value: &str,
) {
    out.push_str(&format!(
        "{label:<label_width$}{value:>width$}\n",
        label_width = LABEL_WIDTH,
        width = WIDTH - LABEL_WIDTH
    ));
}

fn method_block(
    out: &mut String,
    result: &CalculationResult,
) {
    out.push_str(&result.method.label().to_uppercase());
    out.push('\n');

    let deduction_label = match result.method {
        FilingMethod::Itemized => "(-) Legal deductions",
        FilingMethod::Simplified => "(-) Simplified discount",
    };
    amount_line(out, deduction_label, result.deduction);
    amount_line(out, "(=) Taxable base", result.taxable_base);

    if result.regime.applies_reform() {
        amount_line(out, "Computed tax", result.computed_tax);
        amount_line(out, "(-) Reform rebate", result.rebate);
        amount_line(out, "(=) Final tax", result.final_tax);
    } else {
        amount_line(out, "Tax withheld", result.final_tax);
    }
}

// ─── Comparison ──────────────────────────────────────────────────────────────

/// Itemized against simplified for one regime.
///
/// `exemption_limit` is the reform's full-exemption threshold; 2026 reports
/// note each method whose taxable base falls at or below it.
pub fn render_comparison(
    comparison: &MethodComparison,
    input: &CalculationInput,
    exemption_limit: Decimal,
) -> String {
    let mut out = String::new();
    let regime = comparison.regime;
    let base = &comparison.itemized;

    rule(&mut out, '=');
    out.push_str(&format!(
        "COMPARISON {regime}: {} vs {}\n",
        FilingMethod::Itemized.label(),
        FilingMethod::Simplified.label()
    ));
    rule(&mut out, '=');

    amount_line(&mut out, "Gross salary", input.gross_salary);
    amount_line(&mut out, "(-) INSS contribution", base.contribution);
    amount_line(&mut out, "(-) Pension contribution", input.pension_contribution);
    amount_line(&mut out, "(=) Calculation base", base.calculation_base);
    amount_line(&mut out, "Health expense", input.health_expense);
    text_line(&mut out, "Dependents", &input.dependents.to_string());

    rule(&mut out, '-');
    method_block(&mut out, &comparison.itemized);
    rule(&mut out, '-');
    method_block(&mut out, &comparison.simplified);
    rule(&mut out, '-');

    out.push_str("ANALYSIS\n");
    match comparison.cheaper {
        None => out.push_str(&format!(
            "Both methods are practically equal (difference below {}).\n",
            format_brl(PRACTICALLY_EQUAL_THRESHOLD)
        )),
        Some(method) => {
            out.push_str(&format!(
                "{} is cheaper by {} per month.\n",
                method.label(),
                format_brl(comparison.monthly_saving)
            ));
            if !regime.applies_reform() {
                out.push_str(&format!(
                    "Annual saving: {}\n",
                    format_brl(comparison.annual_saving)
                ));
            }
        }
    }

    if regime.applies_reform() {
        for result in [&comparison.itemized, &comparison.simplified] {
            if result.taxable_base <= exemption_limit {
                out.push_str(&format!(
                    "{}: fully exempt, taxable base {} is within {}.\n",
                    result.method.label(),
                    format_brl(result.taxable_base),
                    format_brl(exemption_limit)
                ));
            }
        }
    }

    out
}

// ─── Trend ───────────────────────────────────────────────────────────────────

fn trend_row(trend: &MethodTrend) -> Vec<Cell> {
    vec![
        Cell::new(trend.method.label()),
        Cell::new(format_brl(trend.before.final_tax)).set_alignment(CellAlignment::Right),
        Cell::new(format_brl(trend.after.final_tax)).set_alignment(CellAlignment::Right),
        Cell::new(format_brl(trend.monthly_saving)).set_alignment(CellAlignment::Right),
    ]
}

/// Final tax per method in 2025 and 2026, then the yearly effect.
pub fn render_trend(trend: &RegimeTrend) -> String {
    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Method").add_attribute(Attribute::Bold),
        Cell::new("2025").add_attribute(Attribute::Bold),
        Cell::new("2026").add_attribute(Attribute::Bold),
        Cell::new("Monthly saving").add_attribute(Attribute::Bold),
    ]);
    table.add_row(trend_row(&trend.itemized));
    table.add_row(trend_row(&trend.simplified));

    let mut out = String::new();
    rule(&mut out, '=');
    out.push_str("REFORM IMPACT 2025 -> 2026\n");
    rule(&mut out, '=');
    out.push_str(&table.to_string());
    out.push('\n');
    for method_trend in [&trend.itemized, &trend.simplified] {
        amount_line(
            &mut out,
            &format!("Annual saving, {}", method_trend.method),
            method_trend.annual_saving,
        );
    }
    out
}

// ─── Scenario ────────────────────────────────────────────────────────────────

/// Scenario header followed by every section present in `report`.
pub fn render_scenario(
    report: &ScenarioReport,
    exemption_limit: Decimal,
) -> String {
    let mut out = String::new();
    out.push_str(&format!("\n### {}\n\n", report.label));

    let comparisons = [&report.comparison_2025, &report.comparison_2026];
    for comparison in comparisons.into_iter().flatten() {
        out.push_str(&render_comparison(comparison, &report.input, exemption_limit));
        out.push('\n');
    }
    if let Some(trend) = &report.trend {
        out.push_str(&render_trend(trend));
    }
    out
}

/// Pretty-printed JSON array of reports. Amounts are exact decimal strings.
pub fn render_json(reports: &[ScenarioReport]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(reports)
}

#[cfg(test)]
mod tests {
    use irrf_core::{Regime, WithholdingCalculator};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const EXEMPTION_LIMIT: Decimal = dec!(5000.00);

    fn paycheck() -> CalculationInput {
        CalculationInput::new(dec!(4161.00), dec!(499.32))
            .unwrap()
            .with_health_expense(dec!(145.63))
            .unwrap()
    }

    fn salary_9000() -> CalculationInput {
        CalculationInput::new(dec!(9000), dec!(1080))
            .unwrap()
            .with_health_expense(dec!(145.63))
            .unwrap()
    }

    // =========================================================================
    // render_comparison tests
    // =========================================================================

    #[test]
    fn comparison_2025_names_cheaper_method_and_annual_saving() {
        let input = paycheck();
        let comparison = WithholdingCalculator::default()
            .compare(&input, Regime::Y2025)
            .unwrap();

        let text = render_comparison(&comparison, &input, EXEMPTION_LIMIT);

        assert!(text.contains("COMPARISON 2025"));
        assert!(text.contains("R$ 4,161.00"));
        assert!(text.contains("R$ 3,260.32"));
        assert!(text.contains("R$ 85.76"));
        assert!(text.contains("R$ 26.18"));
        assert!(text.contains("Simplified (Simplificada) is cheaper by R$ 59.59 per month."));
        assert!(text.contains("Annual saving:"));
        assert!(text.contains("R$ 715.03"));
        assert!(!text.contains("Reform rebate"));
    }

    #[test]
    fn comparison_2026_paycheck_is_a_tie_and_exempt() {
        let input = paycheck();
        let comparison = WithholdingCalculator::default()
            .compare(&input, Regime::Y2026)
            .unwrap();

        let text = render_comparison(&comparison, &input, EXEMPTION_LIMIT);

        assert!(text.contains("practically equal"));
        assert!(text.contains("(-) Reform rebate"));
        assert!(text.contains("Itemized (Completa): fully exempt"));
        assert!(text.contains("Simplified (Simplificada): fully exempt"));
        assert!(!text.contains("Annual saving"));
    }

    #[test]
    fn comparison_2026_high_salary_has_no_exemption_note() {
        let input = salary_9000();
        let comparison = WithholdingCalculator::default()
            .compare(&input, Regime::Y2026)
            .unwrap();

        let text = render_comparison(&comparison, &input, EXEMPTION_LIMIT);

        assert!(text.contains("R$ 970.98"));
        assert!(text.contains("R$ 428.82"));
        assert!(text.contains("Simplified (Simplificada) is cheaper"));
        assert!(!text.contains("fully exempt"));
    }

    #[test]
    fn comparison_rules_span_full_width() {
        let input = paycheck();
        let comparison = WithholdingCalculator::default()
            .compare(&input, Regime::Y2025)
            .unwrap();

        let text = render_comparison(&comparison, &input, EXEMPTION_LIMIT);
        let first = text.lines().next().unwrap();

        assert_eq!(first, "=".repeat(WIDTH));
    }

    // =========================================================================
    // render_trend tests
    // =========================================================================

    #[test]
    fn trend_lists_both_methods_and_annual_savings() {
        let trend = WithholdingCalculator::default().trend(&paycheck()).unwrap();

        let text = render_trend(&trend);

        assert!(text.contains("REFORM IMPACT"));
        assert!(text.contains("Itemized (Completa)"));
        assert!(text.contains("Simplified (Simplificada)"));
        assert!(text.contains("R$ 85.76"));
        assert!(text.contains("R$ 0.00"));
        // 85.7649 * 12
        assert!(text.contains("R$ 1,029.18"));
        // 26.17926 * 12
        assert!(text.contains("R$ 314.15"));
    }

    // =========================================================================
    // render_scenario / render_json tests
    // =========================================================================

    fn full_report() -> ScenarioReport {
        let calculator = WithholdingCalculator::default();
        let input = paycheck();
        ScenarioReport {
            label: "October 2025 paycheck".to_string(),
            comparison_2025: Some(calculator.compare(&input, Regime::Y2025).unwrap()),
            comparison_2026: Some(calculator.compare(&input, Regime::Y2026).unwrap()),
            trend: Some(calculator.trend(&input).unwrap()),
            input,
        }
    }

    #[test]
    fn scenario_renders_sections_in_order() {
        let text = render_scenario(&full_report(), EXEMPTION_LIMIT);

        let header = text.find("### October 2025 paycheck").unwrap();
        let y2025 = text.find("COMPARISON 2025").unwrap();
        let y2026 = text.find("COMPARISON 2026").unwrap();
        let trend = text.find("REFORM IMPACT").unwrap();

        assert!(header < y2025);
        assert!(y2025 < y2026);
        assert!(y2026 < trend);
    }

    #[test]
    fn scenario_skips_missing_sections() {
        let mut report = full_report();
        report.comparison_2025 = None;
        report.trend = None;

        let text = render_scenario(&report, EXEMPTION_LIMIT);

        assert!(!text.contains("COMPARISON 2025"));
        assert!(text.contains("COMPARISON 2026"));
        assert!(!text.contains("REFORM IMPACT"));
    }

    #[test]
    fn json_omits_missing_sections_and_keeps_exact_amounts() {
        let mut report = full_report();
        report.comparison_2026 = None;
        report.trend = None;

        let json = render_json(&[report]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let first = &value[0];
        assert_eq!(first["label"], "October 2025 paycheck");
        assert!(first.get("comparison_2026").is_none());
        assert!(first.get("trend").is_none());
        let final_tax: Decimal = first["comparison_2025"]["itemized"]["final_tax"]
            .as_str()
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(final_tax, dec!(85.7649));
        assert_eq!(first["comparison_2025"]["cheaper"], "Simplified");
    }
}
