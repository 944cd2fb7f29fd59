use std::path::{Path, PathBuf};
use crate::catalog::ScenarioCatalog;
use crate::config::{self, HarnessSettings};
use crate::errors::VulnprobeError;
use crate::reporting;
use crate::runner::{HarnessConfig, ScenarioRunner, DEFAULT_TIMEOUT_SECS, DEFAULT_WORKERS};
use super::commands::RunArgs;
use tracing::{info, warn};

pub async fn handle_run(args: RunArgs) -> Result<i32, VulnprobeError> {
    let settings = match &args.config {
        Some(path) => config::parse_settings(Path::new(path)).await?,
        None => HarnessSettings::default(),
    };

    let catalog = ScenarioCatalog::load(Path::new(&args.scenarios))?;
    info!(
        suites = catalog.suites().len(),
        scenarios = catalog.total_scenarios(),
        "Catalog loaded"
    );
    let registry = catalog.into_registry()?;
    if registry.is_empty() {
        return Err(VulnprobeError::Config(format!(
            "Catalog contains no scenarios: {}",
            args.scenarios
        )));
    }
    let registered = registry.len();

    let harness_config = build_harness_config(&args, &settings);
    let output_dir = resolve_output_dir(&args, &settings);
    let run_id = harness_config.run_id.clone();

    let runner = ScenarioRunner::new(registry, harness_config);

    // Ctrl-C cancels the run: in-flight scenarios are abandoned, unstarted
    // ones skipped, and whatever completed still makes it into the report.
    let cancel = runner.cancel_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received — cancelling run");
            cancel.cancel();
        }
    });

    let report = runner.run_all().await?;
    let run_dir = reporting::write_report_files(&report, &output_dir).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for outcome in &report.outcomes {
            println!(
                "{} {:<24} {}",
                if outcome.passed { "PASS" } else { "FAIL" },
                outcome.scenario_id,
                outcome.detail
            );
        }
        println!();
        println!(
            "Run {}: {} passed, {} failed, {} skipped",
            run_id,
            report.pass_count,
            report.fail_count,
            registered - report.outcomes.len()
        );
        println!("Report written to {}", run_dir.display());
    }

    Ok(if report.fail_count == 0 { 0 } else { 1 })
}

fn build_harness_config(args: &RunArgs, settings: &HarnessSettings) -> HarnessConfig {
    let run = settings.run.clone().unwrap_or_default();
    let run_id = args
        .run_id
        .clone()
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    HarnessConfig {
        run_id,
        target: args.target.clone().or(run.target),
        workers: args.workers.or(run.workers).unwrap_or(DEFAULT_WORKERS),
        timeout_secs: args.timeout.or(run.timeout_secs).unwrap_or(DEFAULT_TIMEOUT_SECS),
    }
}

fn resolve_output_dir(args: &RunArgs, settings: &HarnessSettings) -> PathBuf {
    args.output
        .clone()
        .or_else(|| settings.output.clone().and_then(|o| o.directory))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("./results"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{OutputSettings, RunSettings};

    fn make_args() -> RunArgs {
        RunArgs {
            scenarios: "./scenarios".to_string(),
            config: None,
            target: None,
            workers: None,
            timeout: None,
            output: None,
            json: false,
            run_id: Some("run-under-test".to_string()),
        }
    }

    #[test]
    fn test_cli_args_take_precedence_over_settings() {
        let mut args = make_args();
        args.workers = Some(2);
        args.target = Some("http://cli:1".to_string());
        let settings = HarnessSettings {
            run: Some(RunSettings {
                workers: Some(16),
                timeout_secs: Some(30),
                target: Some("http://file:2".to_string()),
            }),
            output: None,
        };

        let config = build_harness_config(&args, &settings);
        assert_eq!(config.workers, 2);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.target.as_deref(), Some("http://cli:1"));
    }

    #[test]
    fn test_defaults_when_nothing_configured() {
        let config = build_harness_config(&make_args(), &HarnessSettings::default());
        assert_eq!(config.workers, DEFAULT_WORKERS);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(config.target.is_none());
    }

    #[test]
    fn test_output_dir_falls_back_to_settings_then_default() {
        let args = make_args();
        let settings = HarnessSettings {
            run: None,
            output: Some(OutputSettings {
                directory: Some("/data/reports".to_string()),
            }),
        };
        assert_eq!(
            resolve_output_dir(&args, &settings),
            PathBuf::from("/data/reports")
        );
        assert_eq!(
            resolve_output_dir(&args, &HarnessSettings::default()),
            PathBuf::from("./results")
        );
    }
}
