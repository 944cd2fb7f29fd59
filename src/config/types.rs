use serde::{Deserialize, Serialize};

/// Optional settings file. Every field has a CLI counterpart; flags take
/// precedence over file values.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct HarnessSettings {
    pub run: Option<RunSettings>,
    pub output: Option<OutputSettings>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct RunSettings {
    pub workers: Option<usize>,
    pub timeout_secs: Option<u64>,
    pub target: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct OutputSettings {
    pub directory: Option<String>,
}
