//! Scenario calculators combining the bracket engine and the reform rebate.

pub mod withholding;

pub use withholding::{
    WithholdingCalculator, calculate_itemized_2025, calculate_itemized_2026,
    calculate_simplified_2025, calculate_simplified_2026,
};
