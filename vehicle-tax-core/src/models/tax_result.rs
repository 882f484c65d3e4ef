use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::CalculationStep;

/// Output of one dimension's bracket calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxComputationResult {
    /// Accumulated tax, never rounded for display.
    pub total: Decimal,
    /// Basis line, one line per bracket, then the total line.
    pub steps: Vec<CalculationStep>,
}

/// Power and weight results merged into one monthly amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinedTaxResult {
    pub power_steps: Vec<CalculationStep>,
    pub weight_steps: Vec<CalculationStep>,
    pub power_total: Decimal,
    pub weight_total: Decimal,
    pub monthly_total: Decimal,
}

impl CombinedTaxResult {
    pub fn from_parts(
        power: TaxComputationResult,
        weight: TaxComputationResult,
    ) -> Self {
        Self {
            monthly_total: power.total.saturating_add(weight.total),
            power_total: power.total,
            weight_total: weight.total,
            power_steps: power.steps,
            weight_steps: weight.steps,
        }
    }
}
