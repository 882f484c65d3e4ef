use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One tier of a progressive schedule.
///
/// The bracket covers `[start, end)`. An `end` of `None` marks the unbounded
/// top bracket of a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub start: Decimal,
    #[serde(default)]
    pub end: Option<Decimal>,
    /// Monetary amount charged per unit inside the bracket.
    pub rate: Decimal,
    pub label: String,
    /// Decimal places used when the rate is rendered in a step.
    pub rate_precision: u32,
}

impl TaxBracket {
    pub fn new(
        start: Decimal,
        end: Option<Decimal>,
        rate: Decimal,
        label: impl Into<String>,
        rate_precision: u32,
    ) -> Self {
        Self {
            start,
            end,
            rate,
            label: label.into(),
            rate_precision,
        }
    }

    /// Width of the bracket, or `None` for the unbounded top bracket.
    pub fn width(&self) -> Option<Decimal> {
        self.end.map(|end| end.saturating_sub(self.start))
    }

    pub fn is_unbounded(&self) -> bool {
        self.end.is_none()
    }
}
