pub mod calculations;
pub mod models;

pub use calculations::{
    WithholdingCalculator, calculate_itemized_2025, calculate_itemized_2026,
    calculate_simplified_2025, calculate_simplified_2026, contribution, progressive_tax,
    reform_rebate,
};
pub use models::*;
