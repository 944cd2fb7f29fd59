use thiserror::Error;

#[derive(Debug, Error)]
pub enum VulnprobeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Duplicate scenario id: {0}")]
    DuplicateId(String),

    #[error("Unknown scenario id: {0}")]
    NotFound(String),

    #[error("Report already finalized: {0}")]
    SealedReport(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}
