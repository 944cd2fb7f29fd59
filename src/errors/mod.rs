pub mod types;

pub use types::VulnprobeError;
