pub mod app;
pub mod cli;
pub mod config;
pub mod logging;
pub mod report;
pub mod utils;

pub use app::App;
pub use cli::{Cli, Command};
