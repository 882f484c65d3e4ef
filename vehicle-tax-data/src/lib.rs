pub mod loader;

pub use loader::{VehicleLoader, VehicleLoaderError, VehicleRecord};
