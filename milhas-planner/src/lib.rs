pub mod book;
pub mod entry;
pub mod share;
pub mod summary;
pub mod validation;

pub use book::{FlightPatch, PlannerError, WorkspaceBook, WorkspacePatch};
pub use entry::{FlightInput, PricingMode};
pub use share::{decode_token, encode_workspace, ShareError, INVALID_WORKSPACE_FORMAT};
pub use summary::WorkspaceSummary;
pub use validation::{validate_flight_input, FieldError, ValidationErrors};
