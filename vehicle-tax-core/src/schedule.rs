//! Bracket schedules for the power and weight components of the monthly
//! vehicle tax.
//!
//! A schedule is plain data. The calculator receives the brackets as
//! parameters, so a different legal schedule only means a different
//! [`TaxScheduleConfig`].
//!
//! # Default schedule
//!
//! | Dimension | Reduction | Floor | Brackets |
//! |-----------|-----------|-------|----------|
//! | Power (kW) | 45 | 10 | 0–35 @ 0.25, 35–60 @ 0.35, 60+ @ 0.45 |
//! | Weight (kg) | 900 | 200 | 0–500 @ 0.015, 500–1200 @ 0.030, 1200+ @ 0.045 |

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{TaxBracket, TaxDimension};

/// Largest rate precision a schedule may request.
pub const MAX_RATE_PRECISION: u32 = 10;

/// Errors found while validating a schedule.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("{0} schedule has no brackets")]
    NoBrackets(TaxDimension),

    #[error("{dimension} bracket {index} ends at {end}, which is not above its start {start}")]
    EmptyBracket {
        dimension: TaxDimension,
        index: usize,
        start: Decimal,
        end: Decimal,
    },

    #[error("{dimension} bracket {index} starts at {start} but the previous bracket ends at {previous_end}")]
    NotContiguous {
        dimension: TaxDimension,
        index: usize,
        start: Decimal,
        previous_end: Decimal,
    },

    #[error("{dimension} bracket {index} is unbounded but is not the last bracket")]
    UnboundedBeforeLast { dimension: TaxDimension, index: usize },

    #[error("{0} schedule must end with an unbounded bracket")]
    BoundedTop(TaxDimension),

    #[error("{dimension} bracket {index} has a negative rate {rate}")]
    NegativeRate {
        dimension: TaxDimension,
        index: usize,
        rate: Decimal,
    },

    #[error(
        "{dimension} bracket {index} requests {precision} rate decimals (maximum {max})",
        max = MAX_RATE_PRECISION
    )]
    RatePrecision {
        dimension: TaxDimension,
        index: usize,
        precision: u32,
    },

    #[error("{dimension} reduction must be non-negative, got {value}")]
    NegativeReduction {
        dimension: TaxDimension,
        value: Decimal,
    },

    #[error("{dimension} floor must be non-negative, got {value}")]
    NegativeFloor {
        dimension: TaxDimension,
        value: Decimal,
    },

    #[error("schedule for {found} configured where {expected} was expected")]
    WrongDimension {
        expected: TaxDimension,
        found: TaxDimension,
    },
}

/// Reduction, floor and brackets for one taxed dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionSchedule {
    pub dimension: TaxDimension,
    /// Unit appended to the basis line, e.g. `kW`.
    pub unit: String,
    /// Tax-free allowance subtracted from the raw value.
    pub reduction: Decimal,
    /// Minimum taxable base after the reduction.
    pub floor: Decimal,
    pub brackets: Vec<TaxBracket>,
}

impl DimensionSchedule {
    /// Creates a schedule after checking the bracket invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError`] if the brackets are empty, overlap, leave a
    /// gap, are not capped by a single unbounded bracket, or if the
    /// reduction, floor, a rate or a rate precision is out of range.
    pub fn new(
        dimension: TaxDimension,
        reduction: Decimal,
        floor: Decimal,
        brackets: Vec<TaxBracket>,
    ) -> Result<Self, ScheduleError> {
        let schedule = Self {
            dimension,
            unit: dimension.unit().to_string(),
            reduction,
            floor,
            brackets,
        };
        schedule.validate()?;
        Ok(schedule)
    }

    /// Checks the invariants listed on [`DimensionSchedule::new`].
    pub fn validate(&self) -> Result<(), ScheduleError> {
        let dimension = self.dimension;

        if self.reduction < Decimal::ZERO {
            return Err(ScheduleError::NegativeReduction {
                dimension,
                value: self.reduction,
            });
        }
        if self.floor < Decimal::ZERO {
            return Err(ScheduleError::NegativeFloor {
                dimension,
                value: self.floor,
            });
        }
        if self.brackets.is_empty() {
            return Err(ScheduleError::NoBrackets(dimension));
        }

        let last = self.brackets.len() - 1;
        let mut previous_end: Option<Decimal> = None;

        for (index, bracket) in self.brackets.iter().enumerate() {
            if let Some(previous_end) = previous_end {
                if bracket.start != previous_end {
                    return Err(ScheduleError::NotContiguous {
                        dimension,
                        index,
                        start: bracket.start,
                        previous_end,
                    });
                }
            }

            if let Some(end) = bracket.end {
                if end <= bracket.start {
                    return Err(ScheduleError::EmptyBracket {
                        dimension,
                        index,
                        start: bracket.start,
                        end,
                    });
                }
            }
            match (bracket.is_unbounded(), index == last) {
                (false, true) => return Err(ScheduleError::BoundedTop(dimension)),
                (true, false) => {
                    return Err(ScheduleError::UnboundedBeforeLast { dimension, index });
                }
                _ => {}
            }

            if bracket.rate < Decimal::ZERO {
                return Err(ScheduleError::NegativeRate {
                    dimension,
                    index,
                    rate: bracket.rate,
                });
            }
            if bracket.rate_precision > MAX_RATE_PRECISION {
                return Err(ScheduleError::RatePrecision {
                    dimension,
                    index,
                    precision: bracket.rate_precision,
                });
            }

            previous_end = bracket.end;
        }

        Ok(())
    }

    /// Value at or below which the floor takes over from the raw input.
    pub fn clamp_threshold(&self) -> Decimal {
        self.reduction.saturating_add(self.floor)
    }
}

/// Bracket tables for both dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxScheduleConfig {
    pub power: DimensionSchedule,
    pub weight: DimensionSchedule,
}

impl TaxScheduleConfig {
    /// The Austrian monthly motor vehicle tax schedule for electric cars.
    pub fn austrian() -> Self {
        Self {
            power: DimensionSchedule {
                dimension: TaxDimension::Power,
                unit: TaxDimension::Power.unit().to_string(),
                reduction: Decimal::from(45),
                floor: Decimal::from(10),
                brackets: vec![
                    TaxBracket::new(
                        Decimal::ZERO,
                        Some(Decimal::from(35)),
                        Decimal::new(25, 2),
                        "Erste 35 kW um 0,25 €:",
                        2,
                    ),
                    TaxBracket::new(
                        Decimal::from(35),
                        Some(Decimal::from(60)),
                        Decimal::new(35, 2),
                        "Nächste 25 kW um 0,35 €:",
                        2,
                    ),
                    TaxBracket::new(
                        Decimal::from(60),
                        None,
                        Decimal::new(45, 2),
                        "Restliche kW um 0,45 €:",
                        2,
                    ),
                ],
            },
            weight: DimensionSchedule {
                dimension: TaxDimension::Weight,
                unit: TaxDimension::Weight.unit().to_string(),
                reduction: Decimal::from(900),
                floor: Decimal::from(200),
                brackets: vec![
                    TaxBracket::new(
                        Decimal::ZERO,
                        Some(Decimal::from(500)),
                        Decimal::new(15, 3),
                        "Erste 500 kg um 0,015 €:",
                        3,
                    ),
                    TaxBracket::new(
                        Decimal::from(500),
                        Some(Decimal::from(1200)),
                        Decimal::new(30, 3),
                        "Nächste 700 kg um 0,030 €:",
                        3,
                    ),
                    TaxBracket::new(
                        Decimal::from(1200),
                        None,
                        Decimal::new(45, 3),
                        "Restliche kg um 0,045 €:",
                        3,
                    ),
                ],
            },
        }
    }

    pub fn schedule(
        &self,
        dimension: TaxDimension,
    ) -> &DimensionSchedule {
        match dimension {
            TaxDimension::Power => &self.power,
            TaxDimension::Weight => &self.weight,
        }
    }

    /// Validates both dimensions, e.g. after loading a schedule from a file.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        for dimension in TaxDimension::all() {
            let schedule = self.schedule(*dimension);
            if schedule.dimension != *dimension {
                return Err(ScheduleError::WrongDimension {
                    expected: *dimension,
                    found: schedule.dimension,
                });
            }
            schedule.validate()?;
        }
        Ok(())
    }
}

impl Default for TaxScheduleConfig {
    fn default() -> Self {
        Self::austrian()
    }
}
