use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

pub type Result<T> = std::result::Result<T, RegroupError>;

#[derive(Debug, Error)]
pub enum RegroupError {
    #[error("extraction failed: {0}")]
    Extraction(String),

    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
    pub operation: String,
    pub trace_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,
}

impl RegroupError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Extraction(_) => "EXTRACTION_FAILED",
            Self::InvalidIdentifier(_) => "INVALID_IDENTIFIER",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::Toml(_) => "TOML_ERROR",
        }
    }

    pub fn to_payload(
        &self,
        operation: impl Into<String>,
        source_name: Option<String>,
    ) -> ErrorPayload {
        ErrorPayload {
            code: self.code().to_string(),
            message: self.to_string(),
            operation: operation.into(),
            trace_id: Uuid::new_v4().to_string(),
            source_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable_per_kind() {
        assert_eq!(
            RegroupError::Extraction("x".to_string()).code(),
            "EXTRACTION_FAILED"
        );
        assert_eq!(
            RegroupError::Configuration("x".to_string()).code(),
            "CONFIGURATION_ERROR"
        );
        assert_eq!(
            RegroupError::InvalidIdentifier("x".to_string()).code(),
            "INVALID_IDENTIFIER"
        );
    }

    #[test]
    fn payload_carries_operation_and_message() {
        let err = RegroupError::Configuration("min_size must be >= 1".to_string());
        let payload = err.to_payload("rebalance", Some("summary.txt".to_string()));
        assert_eq!(payload.code, "CONFIGURATION_ERROR");
        assert_eq!(payload.operation, "rebalance");
        assert!(payload.message.contains("min_size must be >= 1"));
        assert_eq!(payload.trace_id.len(), 36);
        assert_eq!(payload.source_name.as_deref(), Some("summary.txt"));
    }
}
