use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Terminal status of a trigger invocation.
///
/// `Exited` carries a process exit code for local calls and the response
/// status code for HTTP calls. The remaining variants are sentinels: the
/// invoker never raises past its boundary, it encodes the failure here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExitStatus {
    Exited(i32),
    Timeout,
    Error,
    Cancelled,
}

impl std::fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exited(code) => write!(f, "{code}"),
            Self::Timeout => write!(f, "TIMEOUT"),
            Self::Error => write!(f, "ERROR"),
            Self::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// Captured evidence of one scenario invocation. Created once per scenario
/// per run and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResult {
    pub scenario_id: String,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub raw_output: String,
    pub exit_code: Option<ExitStatus>,
    /// Filesystem paths observed in the scratch directory after invocation,
    /// relative to the scratch root, in sorted walk order.
    pub side_effect_paths: Vec<PathBuf>,
}
