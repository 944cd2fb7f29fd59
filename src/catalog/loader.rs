use serde::Deserialize;
use std::path::Path;
use crate::errors::VulnprobeError;
use crate::models::Scenario;
use super::registry::ScenarioRegistry;
use super::schema::CATALOG_SCHEMA;
use tracing::{info, warn};

const MAX_CATALOG_FILE_BYTES: u64 = 1_048_576;

/// One scenario file: a named suite holding an ordered list of scenarios.
#[derive(Debug, Clone, Deserialize)]
pub struct SuiteDefinition {
    pub suite: String,
    pub scenarios: Vec<Scenario>,
}

/// All suites loaded for a run, in discovery order. Loaded once at startup;
/// never mutated during a run.
#[derive(Debug, Default)]
pub struct ScenarioCatalog {
    suites: Vec<SuiteDefinition>,
}

impl ScenarioCatalog {
    /// Load a catalog from a single YAML file or from every `*.yaml` file in
    /// a directory. Directory entries are visited in sorted glob order so
    /// registration order is stable across runs.
    pub fn load(path: &Path) -> Result<Self, VulnprobeError> {
        if !path.exists() {
            return Err(VulnprobeError::Config(format!(
                "Scenario catalog not found: {}",
                path.display()
            )));
        }

        let mut suites = Vec::new();

        if path.is_dir() {
            let pattern = path.join("*.yaml");
            let pattern_str = pattern.to_string_lossy();

            for entry in glob::glob(&pattern_str)
                .map_err(|e| VulnprobeError::Config(format!("Invalid glob pattern: {}", e)))?
            {
                let file = entry.map_err(|e| VulnprobeError::Config(format!("Glob error: {}", e)))?;
                suites.push(load_suite_file(&file)?);
            }

            if suites.is_empty() {
                return Err(VulnprobeError::Config(format!(
                    "No scenario files found in {}",
                    path.display()
                )));
            }
        } else {
            suites.push(load_suite_file(path)?);
        }

        Ok(Self { suites })
    }

    pub fn suites(&self) -> &[SuiteDefinition] {
        &self.suites
    }

    pub fn total_scenarios(&self) -> usize {
        self.suites.iter().map(|s| s.scenarios.len()).sum()
    }

    /// Register every scenario in load order. A duplicate id anywhere in the
    /// catalog is a configuration error that aborts before any invocation.
    pub fn into_registry(self) -> Result<ScenarioRegistry, VulnprobeError> {
        let mut registry = ScenarioRegistry::new();
        for suite in self.suites {
            for scenario in suite.scenarios {
                let id = scenario.id.clone();
                registry.register(scenario).map_err(|_| {
                    VulnprobeError::Config(format!(
                        "Duplicate scenario id '{}' in suite '{}'",
                        id, suite.suite
                    ))
                })?;
            }
        }
        Ok(registry)
    }
}

fn load_suite_file(path: &Path) -> Result<SuiteDefinition, VulnprobeError> {
    let metadata = std::fs::metadata(path)?;
    if metadata.len() > MAX_CATALOG_FILE_BYTES {
        return Err(VulnprobeError::Config(format!(
            "Scenario file exceeds 1MB limit: {}",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path)?;
    let yaml: serde_yaml::Value = serde_yaml::from_str(&content)
        .map_err(|e| VulnprobeError::Config(format!("{}: {}", path.display(), e)))?;

    validate_schema(&yaml, path);

    let suite: SuiteDefinition = serde_yaml::from_value(yaml)
        .map_err(|e| VulnprobeError::Config(format!("{}: {}", path.display(), e)))?;

    info!(
        suite = %suite.suite,
        scenarios = suite.scenarios.len(),
        path = %path.display(),
        "Loaded scenario suite"
    );
    Ok(suite)
}

/// Validate a suite file against the catalog schema. Advisory: structural
/// problems that serde tolerates are logged, not fatal.
fn validate_schema(yaml: &serde_yaml::Value, path: &Path) {
    let json_value = match serde_json::to_string(yaml)
        .ok()
        .and_then(|s| serde_json::from_str::<serde_json::Value>(&s).ok())
    {
        Some(v) => v,
        None => return,
    };

    let compiled = match jsonschema::JSONSchema::compile(&CATALOG_SCHEMA) {
        Ok(c) => c,
        Err(e) => {
            warn!(error = %e, "Catalog schema failed to compile");
            return;
        }
    };

    let validation: Result<(), Vec<String>> = compiled.validate(&json_value).map_err(|errors| {
        errors
            .map(|e| format!("{} at {}", e, e.instance_path))
            .collect()
    });
    if let Err(messages) = validation {
        for message in messages {
            warn!(
                path = %path.display(),
                validation_error = %message,
                "Scenario file schema warning"
            );
        }
    }
}
