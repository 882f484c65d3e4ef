//! Combines the power and weight components into the monthly vehicle tax.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use vehicle_tax_core::calculations::compute_combined;
//!
//! let result = compute_combined(dec!(100), dec!(2500));
//!
//! assert_eq!(result.power_total, dec!(15.75));
//! assert_eq!(result.weight_total, dec!(46.50));
//! assert_eq!(result.monthly_total, dec!(62.25));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::calculations::BracketTaxCalculator;
use crate::format::{LocaleFormatter, StepFormatter};
use crate::schedule::TaxScheduleConfig;
use crate::{CombinedTaxResult, TaxDimension};

/// Errors raised when converting raw floating point input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    /// NaN or an infinity was supplied.
    #[error("{dimension} input must be a finite number, got {value}")]
    NonFinite {
        dimension: TaxDimension,
        value: String,
    },

    /// A finite value too large for the decimal range.
    #[error("{dimension} input {value} is out of range")]
    OutOfRange {
        dimension: TaxDimension,
        value: String,
    },
}

/// Runs the bracket calculator for both dimensions of a schedule.
#[derive(Clone, Copy)]
pub struct TaxResultAggregator<'a> {
    schedule: &'a TaxScheduleConfig,
    formatter: &'a dyn StepFormatter,
}

impl<'a> TaxResultAggregator<'a> {
    pub fn new(
        schedule: &'a TaxScheduleConfig,
        formatter: &'a dyn StepFormatter,
    ) -> Self {
        Self {
            schedule,
            formatter,
        }
    }

    /// Computes both components and their monthly sum.
    ///
    /// Any input is accepted; values below a dimension's reduction plus
    /// floor are taxed at the floor.
    pub fn compute_combined(
        &self,
        power: Decimal,
        weight: Decimal,
    ) -> CombinedTaxResult {
        let calculator = BracketTaxCalculator::new(self.formatter);

        let power_result = calculator.compute_schedule(power, &self.schedule.power);
        let weight_result = calculator.compute_schedule(weight, &self.schedule.weight);

        let combined = CombinedTaxResult::from_parts(power_result, weight_result);
        debug!(
            %power,
            %weight,
            monthly_total = %combined.monthly_total,
            "computed combined vehicle tax"
        );
        combined
    }

    /// Like [`Self::compute_combined`] but for raw `f64` input.
    ///
    /// # Errors
    ///
    /// Returns [`InputError`] if either value is NaN, infinite, or outside
    /// the decimal range. Negative values are not an error.
    pub fn compute_combined_f64(
        &self,
        power: f64,
        weight: f64,
    ) -> Result<CombinedTaxResult, InputError> {
        let power = to_decimal(TaxDimension::Power, power)?;
        let weight = to_decimal(TaxDimension::Weight, weight)?;
        Ok(self.compute_combined(power, weight))
    }
}

/// Computes the monthly tax with the Austrian schedule and `de-AT`
/// formatting.
pub fn compute_combined(
    power: Decimal,
    weight: Decimal,
) -> CombinedTaxResult {
    let schedule = TaxScheduleConfig::austrian();
    let formatter = LocaleFormatter::default();
    TaxResultAggregator::new(&schedule, &formatter).compute_combined(power, weight)
}

/// `f64` counterpart of [`compute_combined`].
pub fn compute_combined_f64(
    power: f64,
    weight: f64,
) -> Result<CombinedTaxResult, InputError> {
    let schedule = TaxScheduleConfig::austrian();
    let formatter = LocaleFormatter::default();
    TaxResultAggregator::new(&schedule, &formatter).compute_combined_f64(power, weight)
}

fn to_decimal(
    dimension: TaxDimension,
    value: f64,
) -> Result<Decimal, InputError> {
    if !value.is_finite() {
        return Err(InputError::NonFinite {
            dimension,
            value: value.to_string(),
        });
    }
    Decimal::try_from(value).map_err(|_| InputError::OutOfRange {
        dimension,
        value: value.to_string(),
    })
}
