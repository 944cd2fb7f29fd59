use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use super::outcome::AssertionOutcome;

/// Aggregated result of one harness execution. Opened at run start, appended
/// to during the run, sealed read-only at run end. The JSON shape is the
/// stable export contract consumed by external reporting tooling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub outcomes: Vec<AssertionOutcome>,
    pub pass_count: usize,
    pub fail_count: usize,
}

impl RunReport {
    pub fn open(run_id: &str) -> Self {
        Self {
            run_id: run_id.to_string(),
            started_at: Utc::now(),
            finished_at: None,
            outcomes: Vec::new(),
            pass_count: 0,
            fail_count: 0,
        }
    }

    pub fn is_sealed(&self) -> bool {
        self.finished_at.is_some()
    }
}
