pub mod models;

pub use models::airline::Airline;
pub use models::flight::{Flight, FlightDetails};
pub use models::workspace::{ShareableWorkspace, Workspace, SHARE_FORMAT_VERSION};
