pub mod http;
pub mod local;
pub mod resolver;

use chrono::Utc;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use crate::models::{ExitStatus, InvocationResult, Scenario, Trigger};
use tracing::debug;

pub use resolver::{has_unresolved, resolve_template};

/// Per-run execution context handed to every trigger. Replaces ambient
/// process state: the target host and the filesystem workspace are explicit.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Scratch directory for this run; filesystem-touching scenarios operate
    /// inside it and it is discarded when the run ends.
    pub scratch_dir: PathBuf,
    /// Base URL substituted for `{target}` in HTTP triggers.
    pub target: Option<String>,
    pub timeout_secs: u64,
}

/// Executes scenario triggers. Always returns an `InvocationResult`; a
/// failing exploit attempt is data for the report, not a harness error.
pub struct TriggerInvoker {
    context: RunContext,
    client: reqwest::Client,
    cancel_token: CancellationToken,
}

impl TriggerInvoker {
    pub fn new(context: RunContext) -> Self {
        Self {
            context,
            client: reqwest::Client::new(),
            cancel_token: CancellationToken::new(),
        }
    }

    /// Replace the invoker's cancel token with an external one so a run-level
    /// cancellation abandons in-flight invocations.
    pub fn with_cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel_token = token;
        self
    }

    pub async fn invoke(&self, scenario: &Scenario) -> InvocationResult {
        let started_at = Utc::now();
        let start = Instant::now();
        debug!(scenario = %scenario.id, kind = scenario.trigger.kind(), "Invoking trigger");

        let (raw_output, exit_code) = tokio::select! {
            biased;
            _ = self.cancel_token.cancelled() => {
                ("invocation cancelled".to_string(), Some(ExitStatus::Cancelled))
            }
            result = self.dispatch(scenario) => result,
        };

        InvocationResult {
            scenario_id: scenario.id.clone(),
            started_at,
            duration_ms: start.elapsed().as_millis() as u64,
            raw_output,
            exit_code,
            side_effect_paths: snapshot_side_effects(&self.context.scratch_dir),
        }
    }

    async fn dispatch(&self, scenario: &Scenario) -> (String, Option<ExitStatus>) {
        match &scenario.trigger {
            Trigger::LocalCall { program, args } => {
                local::invoke_local(program, args, &self.context).await
            }
            Trigger::HttpRequest { method, url, headers, body } => {
                http::invoke_http(&self.client, *method, url, headers, body, &self.context).await
            }
        }
    }
}

/// Record every file present in the scratch directory, relative to its root,
/// in sorted order. This is the observable filesystem footprint of the
/// invocation.
pub fn snapshot_side_effects(scratch_dir: &Path) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    walk(scratch_dir, scratch_dir, &mut paths);
    paths.sort();
    paths
}

fn walk(dir: &Path, root: &Path, acc: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            walk(&path, root, acc);
        } else if let Ok(rel) = path.strip_prefix(root) {
            acc.push(rel.to_path_buf());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Expectation};
    use tempfile::TempDir;

    fn make_invoker(scratch: &Path) -> TriggerInvoker {
        TriggerInvoker::new(RunContext {
            scratch_dir: scratch.to_path_buf(),
            target: None,
            timeout_secs: 5,
        })
    }

    #[tokio::test]
    async fn test_invoke_records_scratch_side_effects() {
        let scratch = TempDir::new().unwrap();
        let invoker = make_invoker(scratch.path());
        let scenario = Scenario {
            id: "file-write-touch".to_string(),
            category: Category::FileWrite,
            description: None,
            trigger: Trigger::LocalCall {
                program: "touch".to_string(),
                args: vec!["{scratch}/dropped.txt".to_string()],
            },
            expectation: Expectation::FileExists {
                path: "dropped.txt".into(),
            },
        };

        let result = invoker.invoke(&scenario).await;
        assert_eq!(result.exit_code, Some(ExitStatus::Exited(0)));
        assert_eq!(result.side_effect_paths, vec![PathBuf::from("dropped.txt")]);
    }

    #[tokio::test]
    async fn test_cancelled_token_yields_cancelled_result() {
        let scratch = TempDir::new().unwrap();
        let token = CancellationToken::new();
        token.cancel();
        let invoker = make_invoker(scratch.path()).with_cancel_token(token);
        let scenario = Scenario {
            id: "cmd-sleep".to_string(),
            category: Category::CommandExec,
            description: None,
            trigger: Trigger::LocalCall {
                program: "sleep".to_string(),
                args: vec!["5".to_string()],
            },
            expectation: Expectation::ExitCodeEquals { code: 0 },
        };

        let result = invoker.invoke(&scenario).await;
        assert_eq!(result.exit_code, Some(ExitStatus::Cancelled));
    }
}
