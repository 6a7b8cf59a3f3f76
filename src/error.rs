use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::ParseError;

#[derive(Debug, Error)]
pub enum FttError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] ParseError),

    #[error("Figma API error (status: {status:?}): {message}")]
    FigmaApi {
        status: Option<StatusCode>,
        message: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl FttError {
    pub fn figma_api(status: Option<StatusCode>, message: impl Into<String>) -> Self {
        FttError::FigmaApi {
            status,
            message: message.into(),
        }
    }

    pub fn to_payload(&self) -> ErrorPayload {
        match self {
            FttError::Io(e) => ErrorPayload::new(
                ErrorCategory::Config,
                e.to_string(),
                "Check file paths/permissions.",
            ),
            FttError::Network(e) => ErrorPayload::new(
                ErrorCategory::Network,
                e.to_string(),
                "Check connectivity/proxy/VPN and retry.",
            ),
            FttError::InvalidUrl(e) => ErrorPayload::new(
                ErrorCategory::Config,
                e.to_string(),
                "Verify the Figma base URL (e.g., https://api.figma.com).",
            ),
            FttError::FigmaApi { message, .. } => ErrorPayload::new(
                ErrorCategory::Figma,
                message.clone(),
                "Check FIGMA_TOKEN and the file key; on rate limits retry after waiting.",
            ),
            FttError::Serialization(e) => ErrorPayload::new(
                ErrorCategory::Document,
                e.to_string(),
                "Make sure the input is the JSON body of a Figma file (GET /v1/files/<key>).",
            ),
            FttError::InvalidDocument(msg) => ErrorPayload::new(
                ErrorCategory::Document,
                msg.to_string(),
                "Make sure the input is the JSON body of a Figma file (GET /v1/files/<key>).",
            ),
            FttError::Config(msg) => {
                let lower = msg.to_ascii_lowercase();
                if lower.contains("figma_token") || lower.contains("figma token") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Set FIGMA_TOKEN (or FIGMA_OAUTH_TOKEN) before fetching Figma files.",
                    )
                } else if lower.contains("file key") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Pass a bare file key or a URL like https://www.figma.com/file/<FILE_KEY>/....",
                    )
                } else if lower.contains("file not found") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Verify the file exists; use an absolute path or `-` to read stdin.",
                    )
                } else {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Check flags and the config file (--config).",
                    )
                }
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, FttError>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Config,
    Network,
    Figma,
    Document,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub category: ErrorCategory,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl ErrorPayload {
    pub fn new(category: ErrorCategory, message: String, remediation: impl Into<String>) -> Self {
        Self {
            category,
            message,
            remediation: Some(remediation.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_payload_uses_default_remediation_for_other_messages() {
        let err = FttError::Config("Some other config issue".to_string());
        let payload = err.to_payload();
        let remediation = payload.remediation.unwrap_or_default();
        assert!(
            remediation.contains("--config"),
            "expected default remediation for generic config errors"
        );
    }

    #[test]
    fn config_payload_includes_figma_token_remediation() {
        let err = FttError::Config("FIGMA_TOKEN environment variable is required".to_string());
        let payload = err.to_payload();
        let remediation = payload.remediation.unwrap_or_default();
        assert!(
            remediation.contains("FIGMA_TOKEN"),
            "expected FIGMA token remediation, got: {remediation}"
        );
    }

    #[test]
    fn config_payload_includes_file_key_hint() {
        let err = FttError::Config("Figma URL missing file key".to_string());
        let remediation = err.to_payload().remediation.unwrap_or_default();
        assert!(
            remediation.to_ascii_lowercase().contains("file_key"),
            "expected file key remediation, got: {remediation}"
        );
    }

    #[test]
    fn config_payload_includes_file_not_found_hint() {
        let err = FttError::Config("Input file not found: design.json".to_string());
        let remediation = err.to_payload().remediation.unwrap_or_default();
        assert!(
            remediation.contains("absolute path"),
            "expected file path remediation, got: {remediation}"
        );
    }

    #[test]
    fn figma_api_payload_passes_message_through_verbatim() {
        let err = FttError::figma_api(Some(StatusCode::FORBIDDEN), "Invalid token");
        let payload = err.to_payload();
        assert_eq!(payload.category, ErrorCategory::Figma);
        assert_eq!(payload.message, "Invalid token");
    }

    #[test]
    fn invalid_document_payload_is_document_category() {
        let err = FttError::InvalidDocument("expected a JSON object".to_string());
        assert_eq!(err.to_payload().category, ErrorCategory::Document);
    }
}
