use std::path::Path;
use crate::errors::VulnprobeError;
use super::schema::SETTINGS_SCHEMA;
use super::types::HarnessSettings;
use tracing::warn;

pub async fn parse_settings(path: &Path) -> Result<HarnessSettings, VulnprobeError> {
    if !path.exists() {
        return Err(VulnprobeError::Config(format!(
            "Settings file not found: {}",
            path.display()
        )));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > 1_048_576 {
        return Err(VulnprobeError::Config("Settings file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    let yaml: serde_yaml::Value = serde_yaml::from_str(&content)
        .map_err(|e| VulnprobeError::Config(format!("{}: {}", path.display(), e)))?;

    validate_schema(&yaml);

    let settings: HarnessSettings = serde_yaml::from_value(yaml)
        .map_err(|e| VulnprobeError::Config(format!("{}: {}", path.display(), e)))?;

    validate_semantics(&settings)?;

    Ok(settings)
}

/// Validate settings against the JSON schema. Advisory: warnings only.
fn validate_schema(yaml: &serde_yaml::Value) {
    let json_value = match serde_json::to_string(yaml)
        .ok()
        .and_then(|s| serde_json::from_str::<serde_json::Value>(&s).ok())
    {
        Some(v) => v,
        None => return,
    };

    let compiled = match jsonschema::JSONSchema::compile(&SETTINGS_SCHEMA) {
        Ok(c) => c,
        Err(e) => {
            warn!(error = %e, "Settings schema failed to compile");
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
            warn!(validation_error = %message, "Settings schema warning");
        }
    }
}

fn validate_semantics(settings: &HarnessSettings) -> Result<(), VulnprobeError> {
    if let Some(run) = &settings.run {
        if run.workers == Some(0) {
            return Err(VulnprobeError::Config("run.workers must be at least 1".into()));
        }
        if run.timeout_secs == Some(0) {
            return Err(VulnprobeError::Config("run.timeout_secs must be at least 1".into()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_parse_full_settings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.yaml");
        fs::write(
            &path,
            "run:\n  workers: 8\n  timeout_secs: 10\n  target: http://127.0.0.1:8080\noutput:\n  directory: ./out\n",
        )
        .unwrap();

        let settings = parse_settings(&path).await.unwrap();
        let run = settings.run.unwrap();
        assert_eq!(run.workers, Some(8));
        assert_eq!(run.timeout_secs, Some(10));
        assert_eq!(settings.output.unwrap().directory.as_deref(), Some("./out"));
    }

    #[tokio::test]
    async fn test_zero_workers_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.yaml");
        fs::write(&path, "run:\n  workers: 0\n").unwrap();

        let err = parse_settings(&path).await.unwrap_err();
        assert!(matches!(err, VulnprobeError::Config(_)));
    }

    #[tokio::test]
    async fn test_missing_file_rejected() {
        let err = parse_settings(Path::new("/nonexistent/settings.yaml"))
            .await
            .unwrap_err();
        assert!(matches!(err, VulnprobeError::Config(_)));
    }
}
