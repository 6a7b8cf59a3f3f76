use std::fs;
use std::path::Path;
use thiserror::Error;
use url::Url;

use serde::{Deserialize, Serialize};

/// Where a design document comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// A Figma file fetched over the REST API.
    Figma,
    /// A local JSON export of a Figma file.
    File,
    /// A JSON document piped on stdin.
    Stdin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSource {
    pub kind: SourceKind,
    pub value: String,
    pub file_key: Option<String>,
}

#[derive(Debug, Error)]
pub enum SourceParseError {
    #[error("Invalid URL '{value}': {message}. Hint: include http(s):// and ensure the URL is well-formed.")]
    InvalidUrl { value: String, message: String },
    #[error("Figma URL missing file key in '{url}'. Hint: use https://www.figma.com/file/<FILE_KEY>/....")]
    FigmaMissingFileKey { url: String },
    #[error("URL '{url}' is not a figma.com file URL.")]
    NotFigma { url: String },
    #[error("Input file not found: {path}. Hint: check the path relative to the current working directory or use an absolute path.")]
    FileNotFound { path: String },
    #[error("Could not tell whether '{value}' is a Figma file key or a local file.")]
    Ambiguous { value: String },
}

/// Classify `value` as a Figma key/URL, a local JSON file, or `-` for stdin.
pub fn parse_source(
    value: &str,
    override_type: Option<SourceKind>,
) -> Result<ParsedSource, SourceParseError> {
    let value = value.trim();
    match override_type {
        Some(SourceKind::Figma) => return parse_figma_source(value),
        Some(SourceKind::File) => return parse_local_source(value),
        Some(SourceKind::Stdin) => return Ok(stdin_source()),
        None => {}
    }

    if value == "-" {
        return Ok(stdin_source());
    }
    if value.starts_with("http://") || value.starts_with("https://") {
        return parse_figma_source(value);
    }
    if value.to_ascii_lowercase().ends_with(".json") || Path::new(value).exists() {
        return parse_local_source(value);
    }
    if is_file_key(value) {
        return parse_figma_source(value);
    }
    Err(SourceParseError::Ambiguous {
        value: value.to_string(),
    })
}

fn stdin_source() -> ParsedSource {
    ParsedSource {
        kind: SourceKind::Stdin,
        value: "-".to_string(),
        file_key: None,
    }
}

fn parse_figma_source(value: &str) -> Result<ParsedSource, SourceParseError> {
    let file_key = if is_file_key(value) {
        value.to_string()
    } else {
        parse_figma_url(value)?
    };
    Ok(ParsedSource {
        kind: SourceKind::Figma,
        value: value.to_string(),
        file_key: Some(file_key),
    })
}

fn parse_figma_url(value: &str) -> Result<String, SourceParseError> {
    let url = Url::parse(value).map_err(|e| SourceParseError::InvalidUrl {
        value: value.to_string(),
        message: e.to_string(),
    })?;

    let host = url.host_str().unwrap_or("");
    if !host.contains("figma.com") {
        return Err(SourceParseError::NotFigma {
            url: value.to_string(),
        });
    }

    let path_segments: Vec<&str> = url.path_segments().map(|c| c.collect()).unwrap_or_default();

    path_segments
        .iter()
        .position(|&s| s == "file" || s == "design" || s == "proto")
        .and_then(|i| path_segments.get(i + 1))
        .filter(|key| !key.is_empty())
        .map(|s| s.to_string())
        .ok_or_else(|| SourceParseError::FigmaMissingFileKey {
            url: value.to_string(),
        })
}

fn parse_local_source(value: &str) -> Result<ParsedSource, SourceParseError> {
    let path = Path::new(value);
    let is_file = fs::metadata(path).map(|m| m.is_file()).unwrap_or(false);
    if !is_file {
        return Err(SourceParseError::FileNotFound {
            path: path.to_string_lossy().into_owned(),
        });
    }

    Ok(ParsedSource {
        kind: SourceKind::File,
        value: value.to_string(),
        file_key: None,
    })
}

fn is_file_key(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric())
}
