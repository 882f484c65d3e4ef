//! Tax calculation modules for the monthly vehicle tax.
//!
//! [`bracket`] distributes one dimension's value across its brackets and
//! records the audit trail; [`combined`] runs it for power and weight and
//! adds the results.

pub mod bracket;
pub mod combined;
pub mod common;

pub use bracket::{BracketTaxCalculator, applicable_amount, effective_value};
pub use combined::{InputError, TaxResultAggregator, compute_combined, compute_combined_f64};
