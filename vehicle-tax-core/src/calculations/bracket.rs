//! Progressive bracket calculation with a step-by-step audit trail.
//!
//! # Algorithm
//!
//! | Step | Description |
//! |------|-------------|
//! | 1 | Effective value: `max(value - reduction, floor)` |
//! | 2 | Basis line showing the effective value |
//! | 3 | Per bracket: `applicable = max(0, min(effective - start, end - start))` |
//! | 4 | Per bracket: `tax = applicable × rate`, accumulated in bracket order |
//! | 5 | One line per bracket, zero brackets included |
//! | 6 | Closing line `Gesamt: <total>` with an empty detail |
//!
//! A value sitting exactly on a bracket's `end` belongs to that bracket; the
//! next bracket receives nothing.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use vehicle_tax_core::calculations::BracketTaxCalculator;
//! use vehicle_tax_core::format::LocaleFormatter;
//! use vehicle_tax_core::TaxScheduleConfig;
//!
//! let schedule = TaxScheduleConfig::default();
//! let formatter = LocaleFormatter::default();
//! let calculator = BracketTaxCalculator::new(&formatter).with_unit("kW");
//!
//! let result = calculator.compute(dec!(100), dec!(45), dec!(10), &schedule.power.brackets);
//!
//! assert_eq!(result.total, dec!(15.75));
//! assert_eq!(result.steps[0].detail, "55 kW");
//! assert_eq!(result.steps[2].detail, "20 × 0.35 = € 7,00");
//! assert_eq!(result.steps[4].label, "Gesamt: € 15,75");
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::{max, min};
use crate::format::StepFormatter;
use crate::schedule::DimensionSchedule;
use crate::{CalculationStep, TaxBracket, TaxComputationResult};

/// Label of the first step, which shows the effective value.
pub const BASIS_LABEL: &str = "Berechnungsgrundlage:";

/// Prefix of the closing step's label; the formatted total follows it.
pub const TOTAL_LABEL: &str = "Gesamt:";

/// Applies the reduction and then the floor to a raw value.
///
/// Negative raw values need no special handling: they fall below the floor
/// like any other small value.
pub fn effective_value(
    value: Decimal,
    reduction: Decimal,
    floor: Decimal,
) -> Decimal {
    max(value.saturating_sub(reduction), floor)
}

/// Portion of `effective` that falls inside `[bracket.start, bracket.end)`.
///
/// Yields zero when `effective` has not reached the bracket and the full
/// bracket width once `effective` has passed it.
pub fn applicable_amount(
    effective: Decimal,
    bracket: &TaxBracket,
) -> Decimal {
    let above_start = effective.saturating_sub(bracket.start);
    let capped = match bracket.width() {
        Some(width) => min(above_start, width),
        None => above_start,
    };
    max(Decimal::ZERO, capped)
}

/// Calculator for one dimension of a bracket schedule.
///
/// The calculator holds no state besides the formatter used for step text,
/// so one instance may be reused for any number of inputs.
#[derive(Clone, Copy)]
pub struct BracketTaxCalculator<'a> {
    formatter: &'a dyn StepFormatter,
    unit: Option<&'a str>,
}

impl<'a> BracketTaxCalculator<'a> {
    pub fn new(formatter: &'a dyn StepFormatter) -> Self {
        Self {
            formatter,
            unit: None,
        }
    }

    /// Appends `unit` to the effective value on the basis line.
    pub fn with_unit(
        mut self,
        unit: &'a str,
    ) -> Self {
        self.unit = Some(unit);
        self
    }

    /// Computes the tax for `value` over `brackets`.
    ///
    /// `brackets` must be ordered by `start`. The returned steps are the
    /// basis line, one line per bracket and the total line, in that order.
    pub fn compute(
        &self,
        value: Decimal,
        reduction: Decimal,
        floor: Decimal,
        brackets: &[TaxBracket],
    ) -> TaxComputationResult {
        let effective = effective_value(value, reduction, floor);

        let mut steps = Vec::with_capacity(brackets.len() + 2);
        steps.push(self.basis_step(effective));

        let mut total = Decimal::ZERO;
        for bracket in brackets {
            let applicable = applicable_amount(effective, bracket);
            let tax = applicable.saturating_mul(bracket.rate);
            steps.push(self.bracket_step(bracket, applicable, tax));
            total = total.saturating_add(tax);
        }

        steps.push(self.total_step(total));

        debug!(
            %value,
            %effective,
            %total,
            brackets = brackets.len(),
            "computed bracket tax"
        );

        TaxComputationResult { total, steps }
    }

    /// Computes the tax for `value` using a complete dimension schedule.
    ///
    /// The schedule's unit replaces any unit set with [`Self::with_unit`].
    pub fn compute_schedule(
        &self,
        value: Decimal,
        schedule: &DimensionSchedule,
    ) -> TaxComputationResult {
        BracketTaxCalculator {
            formatter: self.formatter,
            unit: Some(schedule.unit.as_str()),
        }
        .compute(value, schedule.reduction, schedule.floor, &schedule.brackets)
    }

    fn basis_step(
        &self,
        effective: Decimal,
    ) -> CalculationStep {
        let amount = self.formatter.format_number(effective, 0);
        let detail = match self.unit {
            Some(unit) => format!("{amount} {unit}"),
            None => amount,
        };
        CalculationStep::new(BASIS_LABEL, detail)
    }

    fn bracket_step(
        &self,
        bracket: &TaxBracket,
        applicable: Decimal,
        tax: Decimal,
    ) -> CalculationStep {
        let rate = self
            .formatter
            .format_rate(bracket.rate, bracket.rate_precision);
        let detail = if applicable > Decimal::ZERO {
            format!(
                "{} × {} = {}",
                self.formatter.format_number(applicable, 0),
                rate,
                self.formatter.format_currency(tax)
            )
        } else {
            format!(
                "0 × {} = {}",
                rate,
                self.formatter.format_currency(Decimal::ZERO)
            )
        };
        CalculationStep::new(bracket.label.clone(), detail)
    }

    fn total_step(
        &self,
        total: Decimal,
    ) -> CalculationStep {
        CalculationStep::summary(format!(
            "{TOTAL_LABEL} {}",
            self.formatter.format_currency(total)
        ))
    }
}
