pub mod airline;
pub mod pricing;

pub use airline::{AirlineCatalog, AirlinePatch, CatalogError};
pub use pricing::{derive_amount, derive_price, estimate_price};
