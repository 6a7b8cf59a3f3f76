use crate::error::ErrorPayload;
use crate::pipeline::Snapshot;
use crate::resource::SourceKind;
use crate::tokens::{ColorToken, TokenConfiguration, TypographyToken};
use serde::{Deserialize, Serialize};

/// Schema version for output payloads.
pub const FTT_OUTPUT_VERSION: &str = "0.1.0";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Compact JSON envelope
    #[default]
    Json,
    /// Human-readable summary on a terminal, pretty JSON otherwise
    Pretty,
    /// YAML envelope
    Yaml,
    /// `tailwind.config.js` module
    Tailwind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum FttOutput {
    Tokens(TokensOutput),
    Error(ErrorOutput),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceDescriptor {
    pub kind: SourceKind,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokensOutput {
    pub version: String,
    pub source: SourceDescriptor,
    pub configuration: TokenConfiguration,
    #[serde(default)]
    pub colors: Vec<ColorToken>,
    #[serde(default)]
    pub typography: Vec<TypographyToken>,
}

impl TokensOutput {
    pub fn new(source: SourceDescriptor, snapshot: Snapshot) -> Self {
        Self {
            version: FTT_OUTPUT_VERSION.to_string(),
            source,
            configuration: snapshot.configuration,
            colors: snapshot.colors,
            typography: snapshot.typography,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorOutput {
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub error: ErrorPayload,
}
