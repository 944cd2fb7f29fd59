pub mod scenario;
pub mod invocation;
pub mod outcome;
pub mod report;

pub use scenario::*;
pub use invocation::*;
pub use outcome::*;
pub use report::*;
