pub mod parser;
pub mod schema;
pub mod types;

pub use parser::parse_settings;
pub use types::*;
