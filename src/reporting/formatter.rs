use crate::models::{AssertionOutcome, RunReport};

pub fn format_outcome_markdown(outcome: &AssertionOutcome) -> String {
    format!(
        "### {}\n\n**Result:** {}\n\n{}\n",
        outcome.scenario_id,
        if outcome.passed { "PASS" } else { "FAIL" },
        outcome.detail,
    )
}

pub fn format_run_summary(report: &RunReport) -> String {
    format!(
        "## Run Summary\n\n| | Count |\n|---|---|\n| Passed | {} |\n| Failed | {} |\n| **Total** | **{}** |\n",
        report.pass_count,
        report.fail_count,
        report.outcomes.len(),
    )
}

pub fn format_report_markdown(report: &RunReport) -> String {
    let mut md = String::new();
    md.push_str(&format!("# Scenario Run Report: {}\n\n", report.run_id));
    md.push_str(&format_run_summary(report));
    md.push_str("\n\n---\n\n");
    for outcome in &report.outcomes {
        md.push_str(&format_outcome_markdown(outcome));
        md.push_str("\n---\n\n");
    }
    md
}
