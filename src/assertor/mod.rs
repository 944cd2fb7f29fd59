use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};
use crate::models::{AssertionOutcome, Expectation, ExitStatus, InvocationResult, Scenario};

/// Evaluate a scenario's declared expectation against its invocation result
/// and the run workspace. Expectations that cannot be evaluated (a path
/// outside the workspace) fail closed.
pub fn evaluate(
    scenario: &Scenario,
    result: &InvocationResult,
    workspace: &Path,
) -> AssertionOutcome {
    if result.exit_code == Some(ExitStatus::Cancelled) {
        return AssertionOutcome::failed(&scenario.id, "invocation cancelled");
    }

    match &scenario.expectation {
        Expectation::ContainsText { text } => {
            if result.raw_output.contains(text.as_str()) {
                AssertionOutcome::passed(&scenario.id, format!("output contains {:?}", text))
            } else {
                AssertionOutcome::failed(
                    &scenario.id,
                    format!(
                        "output does not contain {:?} ({} bytes captured)",
                        text,
                        result.raw_output.len()
                    ),
                )
            }
        }

        Expectation::FileExists { path } => match resolve_workspace_path(path, workspace) {
            None => unevaluatable(scenario),
            Some(resolved) => {
                if resolved.exists() {
                    AssertionOutcome::passed(
                        &scenario.id,
                        format!("file exists: {}", path.display()),
                    )
                } else {
                    AssertionOutcome::failed(
                        &scenario.id,
                        format!("file not found: {}", path.display()),
                    )
                }
            }
        },

        Expectation::FileAbsent { path } => match resolve_workspace_path(path, workspace) {
            None => unevaluatable(scenario),
            Some(resolved) => {
                if resolved.exists() {
                    AssertionOutcome::failed(
                        &scenario.id,
                        format!("unexpected file: {}", path.display()),
                    )
                } else {
                    AssertionOutcome::passed(
                        &scenario.id,
                        format!("no file at: {}", path.display()),
                    )
                }
            }
        },

        Expectation::ExitCodeEquals { code } => match result.exit_code {
            Some(ExitStatus::Exited(actual)) if actual == *code => {
                AssertionOutcome::passed(&scenario.id, format!("exit status {}", actual))
            }
            Some(status) => AssertionOutcome::failed(
                &scenario.id,
                format!("exit status {}, expected {}", status, code),
            ),
            None => AssertionOutcome::failed(
                &scenario.id,
                format!("no exit status recorded, expected {}", code),
            ),
        },

        Expectation::PathsAccessed { paths } => {
            if paths
                .iter()
                .any(|p| p.is_absolute() || has_parent_component(p))
            {
                return unevaluatable(scenario);
            }
            let observed: HashSet<&PathBuf> = result.side_effect_paths.iter().collect();
            let missing: Vec<String> = paths
                .iter()
                .filter(|p| !observed.contains(p))
                .map(|p| p.display().to_string())
                .collect();
            if missing.is_empty() {
                AssertionOutcome::passed(
                    &scenario.id,
                    format!("all {} declared paths observed", paths.len()),
                )
            } else {
                AssertionOutcome::failed(
                    &scenario.id,
                    format!("paths not observed: {}", missing.join(", ")),
                )
            }
        }
    }
}

fn unevaluatable(scenario: &Scenario) -> AssertionOutcome {
    AssertionOutcome::failed(&scenario.id, "expectation unevaluatable")
}

/// Confine an expectation path to the run workspace. Absolute paths must
/// already be inside it; relative paths must not climb out of it.
fn resolve_workspace_path(path: &Path, workspace: &Path) -> Option<PathBuf> {
    if path.is_absolute() {
        return path.starts_with(workspace).then(|| path.to_path_buf());
    }
    if has_parent_component(path) {
        return None;
    }
    Some(workspace.join(path))
}

fn has_parent_component(path: &Path) -> bool {
    path.components().any(|c| matches!(c, Component::ParentDir))
}
