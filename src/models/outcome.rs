use serde::{Deserialize, Serialize};

/// Pass/fail verdict for one scenario, derived from its invocation result
/// and declared expectation. Immutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssertionOutcome {
    pub scenario_id: String,
    pub passed: bool,
    pub detail: String,
}

impl AssertionOutcome {
    pub fn passed(scenario_id: &str, detail: impl Into<String>) -> Self {
        Self {
            scenario_id: scenario_id.to_string(),
            passed: true,
            detail: detail.into(),
        }
    }

    pub fn failed(scenario_id: &str, detail: impl Into<String>) -> Self {
        Self {
            scenario_id: scenario_id.to_string(),
            passed: false,
            detail: detail.into(),
        }
    }
}
