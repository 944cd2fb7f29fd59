pub mod commands;
pub mod list;
pub mod run;
pub mod validate;

pub use commands::{Cli, Commands};
