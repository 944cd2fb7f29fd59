use std::collections::BTreeMap;
use std::sync::Arc;
use futures::future::join_all;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use crate::assertor;
use crate::catalog::ScenarioRegistry;
use crate::errors::VulnprobeError;
use crate::invoker::{RunContext, TriggerInvoker};
use crate::models::{AssertionOutcome, RunReport};
use crate::reporting::ReportAggregator;
use tracing::{debug, error, info};

pub const DEFAULT_WORKERS: usize = 4;
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone)]
pub struct HarnessConfig {
    pub run_id: String,
    /// Base URL substituted for `{target}` in HTTP triggers.
    pub target: Option<String>,
    /// Maximum concurrent invocations.
    pub workers: usize,
    /// Per-invocation timeout.
    pub timeout_secs: u64,
}

impl HarnessConfig {
    pub fn new(run_id: &str) -> Self {
        Self {
            run_id: run_id.to_string(),
            target: None,
            workers: DEFAULT_WORKERS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Drives one full pass over the registry: invoke each scenario, evaluate
/// its expectation, aggregate outcomes into a sealed report.
///
/// Scenarios run concurrently up to the worker limit, but the report always
/// lists outcomes in registration order: completions are buffered by rank
/// and flushed in order. Cancellation abandons in-flight invocations (their
/// outcome records the cancelled status) and skips unstarted scenarios
/// entirely.
pub struct ScenarioRunner {
    registry: ScenarioRegistry,
    config: HarnessConfig,
    cancel_token: CancellationToken,
}

impl ScenarioRunner {
    pub fn new(registry: ScenarioRegistry, config: HarnessConfig) -> Self {
        Self {
            registry,
            config,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Replace the runner's cancel token with an external one (e.g. wired to
    /// a signal handler) so callers can stop the run.
    pub fn with_cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel_token = token;
        self
    }

    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    pub async fn run_all(&self) -> Result<RunReport, VulnprobeError> {
        // Fresh scratch directory per run; dropped (and deleted) when the
        // run ends, so no state leaks into the next run.
        let scratch = tempfile::Builder::new().prefix("vulnprobe-").tempdir()?;
        let workspace = scratch.path().to_path_buf();

        info!(
            run_id = %self.config.run_id,
            scenarios = self.registry.len(),
            workers = self.config.workers,
            scratch = %workspace.display(),
            "Run started"
        );

        let mut aggregator = ReportAggregator::begin(&self.config.run_id);

        let invoker = Arc::new(
            TriggerInvoker::new(RunContext {
                scratch_dir: workspace.clone(),
                target: self.config.target.clone(),
                timeout_secs: self.config.timeout_secs,
            })
            .with_cancel_token(self.cancel_token.clone()),
        );
        let semaphore = Arc::new(Semaphore::new(self.config.workers.max(1)));

        let handles: Vec<_> = self
            .registry
            .list()
            .cloned()
            .enumerate()
            .map(|(rank, scenario)| {
                let invoker = invoker.clone();
                let semaphore = semaphore.clone();
                let cancel = self.cancel_token.clone();
                let workspace = workspace.clone();

                tokio::spawn(async move {
                    let permit = tokio::select! {
                        biased;
                        _ = cancel.cancelled() => None,
                        permit = semaphore.clone().acquire_owned() => permit.ok(),
                    };
                    let Some(_permit) = permit else {
                        debug!(scenario = %scenario.id, "Skipped — run cancelled before start");
                        return None;
                    };
                    if cancel.is_cancelled() {
                        debug!(scenario = %scenario.id, "Skipped — run cancelled before start");
                        return None;
                    }

                    let result = invoker.invoke(&scenario).await;
                    let outcome = assertor::evaluate(&scenario, &result, &workspace);
                    info!(
                        scenario = %scenario.id,
                        category = %scenario.category,
                        passed = outcome.passed,
                        duration_ms = result.duration_ms,
                        "Scenario evaluated"
                    );
                    Some((rank, outcome))
                })
            })
            .collect();

        // Buffer completions by rank and flush in registration order.
        let mut buffered: BTreeMap<usize, AssertionOutcome> = BTreeMap::new();
        for task in join_all(handles).await {
            match task {
                Ok(Some((rank, outcome))) => {
                    buffered.insert(rank, outcome);
                }
                Ok(None) => {}
                Err(e) => error!(error = %e, "Scenario task panicked"),
            }
        }

        for (_, outcome) in buffered {
            aggregator.record(outcome)?;
        }
        let report = aggregator.finalize()?;

        info!(
            run_id = %self.config.run_id,
            passed = report.pass_count,
            failed = report.fail_count,
            skipped = self.registry.len() - report.outcomes.len(),
            "Run finished"
        );
        Ok(report)
    }
}
