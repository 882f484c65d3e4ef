pub mod calculations;
pub mod format;
pub mod models;
pub mod schedule;

pub use calculations::{TaxResultAggregator, compute_combined};
pub use models::*;
pub use schedule::{DimensionSchedule, ScheduleError, TaxScheduleConfig};
