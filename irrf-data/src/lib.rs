//! File-based inputs for the withholding calculator: scenario batches from
//! CSV and law-table overrides from TOML.

pub mod rules;
pub mod scenarios;

pub use rules::{RulesLoadError, load_rules_from_file, load_rules_from_str};
pub use scenarios::{Scenario, ScenarioLoadError, load_from_file, load_from_str};
