pub mod airline;
pub mod flight;
pub mod workspace;
