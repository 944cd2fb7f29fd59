pub mod loader;
pub mod registry;
pub mod schema;

pub use loader::{ScenarioCatalog, SuiteDefinition};
pub use registry::ScenarioRegistry;
