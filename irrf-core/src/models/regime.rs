use std::fmt;

use serde::{Deserialize, Serialize};

/// Legal regime the withholding is computed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Regime {
    /// Rules in force during 2025, before the reform.
    Y2025,
    /// 2026 rules: same tables plus the reform rebate.
    Y2026,
}

impl Regime {
    pub fn year(&self) -> i32 {
        match self {
            Self::Y2025 => 2025,
            Self::Y2026 => 2026,
        }
    }

    pub fn applies_reform(&self) -> bool {
        matches!(self, Self::Y2026)
    }
}

impl fmt::Display for Regime {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.year())
    }
}

/// How deductions are claimed on the taxable base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilingMethod {
    /// Actual health expenses plus a per-dependent allowance ("Completa").
    Itemized,
    /// Flat percentage of the base, capped ("Simplificada").
    Simplified,
}

impl FilingMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Itemized => "itemized",
            Self::Simplified => "simplified",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Itemized => "Itemized (Completa)",
            Self::Simplified => "Simplified (Simplificada)",
        }
    }
}

impl fmt::Display for FilingMethod {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
