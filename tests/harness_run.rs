use tempfile::TempDir;
use vulnprobe::catalog::ScenarioRegistry;
use vulnprobe::models::{Category, Expectation, RunReport, Scenario, Trigger};
use vulnprobe::reporting;
use vulnprobe::runner::{HarnessConfig, ScenarioRunner};

fn local_scenario(
    id: &str,
    category: Category,
    program: &str,
    args: &[&str],
    expectation: Expectation,
) -> Scenario {
    Scenario {
        id: id.to_string(),
        category,
        description: None,
        trigger: Trigger::LocalCall {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        },
        expectation,
    }
}

#[tokio::test]
async fn test_run_all_end_to_end() {
    let mut registry = ScenarioRegistry::new();
    registry
        .register(local_scenario(
            "cmd-echo",
            Category::CommandExec,
            "echo",
            &["hi"],
            Expectation::ContainsText { text: "hi".to_string() },
        ))
        .unwrap();

    let runner = ScenarioRunner::new(registry, HarnessConfig::new("run-e2e"));
    let report = runner.run_all().await.unwrap();

    assert_eq!(report.run_id, "run-e2e");
    assert!(report.is_sealed());
    assert_eq!(report.outcomes.len(), 1);
    assert_eq!(report.pass_count, 1);
    assert_eq!(report.fail_count, 0);
    assert!(report.outcomes[0].passed);
}

#[tokio::test]
async fn test_counts_add_up_and_order_is_stable() {
    let mut registry = ScenarioRegistry::new();
    registry
        .register(local_scenario(
            "cmd-echo",
            Category::CommandExec,
            "echo",
            &["hi"],
            Expectation::ContainsText { text: "hi".to_string() },
        ))
        .unwrap();
    registry
        .register(local_scenario(
            "cmd-false",
            Category::CommandExec,
            "false",
            &[],
            Expectation::ExitCodeEquals { code: 0 },
        ))
        .unwrap();
    registry
        .register(local_scenario(
            "file-read-missing",
            Category::FileRead,
            "cat",
            &["/definitely/not/here"],
            Expectation::ContainsText { text: "localhost".to_string() },
        ))
        .unwrap();

    let runner = ScenarioRunner::new(registry, HarnessConfig::new("run-mixed"));
    let report = runner.run_all().await.unwrap();

    assert_eq!(report.outcomes.len(), 3);
    assert_eq!(report.pass_count + report.fail_count, 3);
    assert_eq!(report.pass_count, 1);
    assert_eq!(report.fail_count, 2);

    let ids: Vec<&str> = report
        .outcomes
        .iter()
        .map(|o| o.scenario_id.as_str())
        .collect();
    assert_eq!(ids, vec!["cmd-echo", "cmd-false", "file-read-missing"]);
}

#[tokio::test]
async fn test_scratch_is_isolated_between_runs() {
    let write_scenario = local_scenario(
        "file-write-drop",
        Category::FileWrite,
        "touch",
        &["{scratch}/dropped.txt"],
        Expectation::FileExists { path: "dropped.txt".into() },
    );

    let mut first = ScenarioRegistry::new();
    first.register(write_scenario.clone()).unwrap();
    let report = ScenarioRunner::new(first, HarnessConfig::new("run-1"))
        .run_all()
        .await
        .unwrap();
    assert_eq!(report.pass_count, 1);

    // A second run gets a fresh scratch directory: the first run's file must
    // not be visible.
    let mut second = ScenarioRegistry::new();
    second
        .register(local_scenario(
            "leftover-check",
            Category::FileWrite,
            "true",
            &[],
            Expectation::FileAbsent { path: "dropped.txt".into() },
        ))
        .unwrap();
    let report = ScenarioRunner::new(second, HarnessConfig::new("run-2"))
        .run_all()
        .await
        .unwrap();
    assert_eq!(report.pass_count, 1, "{:?}", report.outcomes);
}

#[tokio::test]
async fn test_http_failure_is_data_not_a_crash() {
    let mut registry = ScenarioRegistry::new();
    registry
        .register(Scenario {
            id: "ssrf-unreachable".to_string(),
            category: Category::Ssrf,
            description: None,
            trigger: Trigger::HttpRequest {
                method: vulnprobe::models::HttpMethod::Get,
                url: "http://127.0.0.1:1/vulns".to_string(),
                headers: Default::default(),
                body: None,
            },
            expectation: Expectation::ContainsText { text: "uid=".to_string() },
        })
        .unwrap();

    let mut config = HarnessConfig::new("run-http");
    config.timeout_secs = 2;
    let report = ScenarioRunner::new(registry, config)
        .run_all()
        .await
        .unwrap();

    assert_eq!(report.outcomes.len(), 1);
    assert_eq!(report.fail_count, 1);
}

#[tokio::test]
async fn test_report_files_round_trip() {
    let mut registry = ScenarioRegistry::new();
    registry
        .register(local_scenario(
            "cmd-echo",
            Category::CommandExec,
            "echo",
            &["hi"],
            Expectation::ContainsText { text: "hi".to_string() },
        ))
        .unwrap();

    let report = ScenarioRunner::new(registry, HarnessConfig::new("run-export"))
        .run_all()
        .await
        .unwrap();

    let output = TempDir::new().unwrap();
    let run_dir = reporting::write_report_files(&report, output.path())
        .await
        .unwrap();
    assert_eq!(run_dir, output.path().join("run-export"));

    let json = std::fs::read_to_string(run_dir.join("report.json")).unwrap();
    let loaded: RunReport = serde_json::from_str(&json).unwrap();
    assert_eq!(loaded.run_id, report.run_id);
    assert_eq!(loaded.pass_count, 1);
    assert!(json.contains("\"passCount\""));

    let md = std::fs::read_to_string(run_dir.join("report.md")).unwrap();
    assert!(md.contains("Run Summary"));
    assert!(md.contains("cmd-echo"));
}
