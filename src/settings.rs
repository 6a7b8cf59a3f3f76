use std::path::Path;

use ftt_lib::{ColorCollisionPolicy, Config, FttError, OutputFormat, PipelineOptions};

use crate::cli::CollisionPolicy;

/// Resolved settings after merging CLI args and config file.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedSettings {
    pub format: OutputFormat,
    pub pipeline: PipelineOptions,
}

/// Merge CLI arguments with the config file, preferring CLI values when given.
pub fn resolve_settings(
    cli_format: Option<OutputFormat>,
    cli_color_collisions: Option<CollisionPolicy>,
    config: &Config,
) -> ResolvedSettings {
    let color_collisions = cli_color_collisions
        .map(ColorCollisionPolicy::from)
        .unwrap_or(config.tokens.color_collisions);
    ResolvedSettings {
        format: cli_format.unwrap_or(config.output.format),
        pipeline: PipelineOptions { color_collisions },
    }
}

/// Load and validate the config file.
pub fn load_config(path: Option<&Path>) -> Result<Config, FttError> {
    let cfg = Config::load(path).map_err(|e| {
        let loc = path
            .map(|p| p.display().to_string())
            .or_else(|| Config::central_config_path().map(|p| p.display().to_string()))
            .unwrap_or_else(|| "defaults".to_string());
        FttError::Config(format!("Failed to read config {}: {}", loc, e))
    })?;

    cfg.validate().map_err(|e| {
        let prefix = path
            .map(|p| format!("Invalid config ({}): {}", p.display(), e))
            .unwrap_or_else(|| format!("Invalid config: {}", e));
        FttError::Config(prefix)
    })?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn resolve_prefers_cli_over_config() {
        let mut config = Config::default();
        config.output.format = OutputFormat::Yaml;
        config.tokens.color_collisions = ColorCollisionPolicy::Suffix;

        let from_config = resolve_settings(None, None, &config);
        assert_eq!(from_config.format, OutputFormat::Yaml);
        assert_eq!(
            from_config.pipeline.color_collisions,
            ColorCollisionPolicy::Suffix
        );

        let from_cli = resolve_settings(
            Some(OutputFormat::Tailwind),
            Some(CollisionPolicy::Overwrite),
            &config,
        );
        assert_eq!(from_cli.format, OutputFormat::Tailwind);
        assert_eq!(
            from_cli.pipeline.color_collisions,
            ColorCollisionPolicy::Overwrite
        );
    }

    #[test]
    fn load_config_reports_invalid_values_with_path() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[figma]\nbase_url = \"ftp://example.com\"").expect("write");

        let err = load_config(Some(file.path())).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Invalid config"));
        assert!(message.contains(&file.path().display().to_string()));
    }

    #[test]
    fn load_config_reports_unreadable_file() {
        let err = load_config(Some(Path::new("/tmp/ftt-does-not-exist.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }
}
