use chrono::Utc;
use crate::errors::VulnprobeError;
use crate::models::{AssertionOutcome, RunReport};

/// Accumulates assertion outcomes into a run report. Outcomes are appended
/// in call order; the runner is responsible for calling `record` in
/// scenario registration order. `finalize` seals the report; recording into
/// a sealed report is a programming error.
#[derive(Debug)]
pub struct ReportAggregator {
    report: RunReport,
    sealed: bool,
}

impl ReportAggregator {
    pub fn begin(run_id: &str) -> Self {
        Self {
            report: RunReport::open(run_id),
            sealed: false,
        }
    }

    pub fn record(&mut self, outcome: AssertionOutcome) -> Result<(), VulnprobeError> {
        if self.sealed {
            return Err(VulnprobeError::SealedReport(format!(
                "cannot record outcome for '{}' into run {}",
                outcome.scenario_id, self.report.run_id
            )));
        }
        self.report.outcomes.push(outcome);
        Ok(())
    }

    /// Seal the report: stamp the finish time, compute pass/fail counts and
    /// return the finished report. Further `record` calls fail.
    pub fn finalize(&mut self) -> Result<RunReport, VulnprobeError> {
        if self.sealed {
            return Err(VulnprobeError::SealedReport(format!(
                "run {} already finalized",
                self.report.run_id
            )));
        }
        self.sealed = true;
        self.report.finished_at = Some(Utc::now());
        self.report.pass_count = self.report.outcomes.iter().filter(|o| o.passed).count();
        self.report.fail_count = self.report.outcomes.len() - self.report.pass_count;
        Ok(self.report.clone())
    }

    pub fn outcome_count(&self) -> usize {
        self.report.outcomes.len()
    }
}
