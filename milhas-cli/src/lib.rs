pub mod app;
pub mod cli;
pub mod share_link;

pub use app::App;
pub use cli::{Cli, Command};
