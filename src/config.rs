use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::figma_client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use crate::output::OutputFormat;
use crate::tokens::ColorCollisionPolicy;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub figma: FigmaSettings,
    pub output: OutputSettings,
    pub tokens: TokenSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FigmaSettings {
    pub base_url: String,
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for FigmaSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSettings {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TokenSettings {
    pub color_collisions: ColorCollisionPolicy,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Parse(#[from] toml::de::Error),
}

impl Config {
    /// `~/.config/ftt/config.toml`, when a home directory is known.
    pub fn central_config_path() -> Option<PathBuf> {
        std::env::var_os("HOME")
            .filter(|home| !home.is_empty())
            .map(|home| PathBuf::from(home).join(".config").join("ftt").join("config.toml"))
    }

    /// Load from `path`, else the central config if present, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigLoadError> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        match Self::central_config_path() {
            Some(central) if central.is_file() => Self::from_file(&central),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigLoadError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigLoadError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.figma.timeout.is_zero() {
            return Err("figma.timeout must be greater than zero".to_string());
        }
        let url = Url::parse(&self.figma.base_url)
            .map_err(|e| format!("figma.base_url '{}' is invalid: {e}", self.figma.base_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!(
                "figma.base_url must use http or https, got '{}'",
                url.scheme()
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_values_match_expected() {
        let cfg = Config::default();

        assert_eq!(cfg.figma.base_url, "https://api.figma.com");
        assert_eq!(cfg.figma.timeout, Duration::from_secs(30));
        assert_eq!(cfg.output.format, OutputFormat::Json);
        assert_eq!(cfg.tokens.color_collisions, ColorCollisionPolicy::Overwrite);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults_for_missing_keys() {
        let cfg = Config::from_toml_str(
            r#"
            [figma]
            timeout = "5s"

            [tokens]
            color_collisions = "suffix"
            "#,
        )
        .expect("parse");

        assert_eq!(cfg.figma.timeout, Duration::from_secs(5));
        assert_eq!(cfg.figma.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.tokens.color_collisions, ColorCollisionPolicy::Suffix);
        assert_eq!(cfg.output.format, OutputFormat::Json);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = Config::from_toml_str("[figma]\ntoken = \"x\"\n").unwrap_err();
        assert!(err.to_string().contains("token"));
    }

    #[test]
    fn validate_rejects_zero_timeout_and_bad_scheme() {
        let mut cfg = Config::default();
        cfg.figma.timeout = Duration::ZERO;
        assert!(cfg.validate().unwrap_err().contains("timeout"));

        let mut cfg = Config::default();
        cfg.figma.base_url = "ftp://api.figma.com".to_string();
        assert!(cfg.validate().unwrap_err().contains("http"));
    }

    #[test]
    fn load_reads_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[output]\nformat = \"yaml\"").expect("write");

        let cfg = Config::load(Some(file.path())).expect("load");
        assert_eq!(cfg.output.format, OutputFormat::Yaml);
    }

    #[test]
    fn load_missing_explicit_path_is_an_error() {
        let result = Config::load(Some(Path::new("/tmp/ftt-missing-config.toml")));
        assert!(matches!(result, Err(ConfigLoadError::Io(_))));
    }
}
