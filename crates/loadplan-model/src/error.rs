//! Model loading errors

/// Errors raised while decoding a workload model document
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// JSON document could not be decoded
    #[error("invalid JSON workload model: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML document could not be decoded
    #[error("invalid YAML workload model: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
