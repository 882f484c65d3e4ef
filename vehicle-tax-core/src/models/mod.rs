mod calculation_step;
mod tax_bracket;
mod tax_dimension;
mod tax_result;

pub use calculation_step::CalculationStep;
pub use tax_bracket::TaxBracket;
pub use tax_dimension::TaxDimension;
pub use tax_result::{CombinedTaxResult, TaxComputationResult};
