use std::path::PathBuf;
use std::process::ExitCode;

use ftt_lib::{
    parse_source, pipeline, FttError, FttOutput, OutputFormat, SourceDescriptor, TokensOutput,
};
use tracing::debug;

use crate::cli::{CollisionPolicy, SourceType};
use crate::formatting::{render_error, write_output};
use crate::settings::{load_config, resolve_settings};
use crate::source::load_document;

/// Run the extract command.
pub async fn run_extract(
    config_path: Option<PathBuf>,
    source: String,
    source_type: Option<SourceType>,
    format: Option<OutputFormat>,
    output: Option<PathBuf>,
    color_collisions: Option<CollisionPolicy>,
) -> ExitCode {
    let error_format = format.unwrap_or_default();
    let config = match load_config(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, error_format, None),
    };
    let settings = resolve_settings(format, color_collisions, &config);
    debug!(
        format = ?settings.format,
        color_collisions = ?settings.pipeline.color_collisions,
        config = ?config_path,
        "effective settings"
    );

    let parsed = match parse_source(&source, source_type.map(Into::into)) {
        Ok(parsed) => parsed,
        Err(err) => return render_error(FttError::Config(err.to_string()), settings.format, None),
    };
    debug!(kind = ?parsed.kind, file_key = ?parsed.file_key, "source resolved");

    let document = match load_document(&parsed, &config).await {
        Ok(document) => document,
        Err(err) => return render_error(err, settings.format, None),
    };
    let snapshot = pipeline::run(&document, &settings.pipeline);

    let body = FttOutput::Tokens(TokensOutput::new(
        SourceDescriptor {
            kind: parsed.kind,
            value: parsed.value,
        },
        snapshot,
    ));
    if let Err(err) = write_output(&body, settings.format, output.as_deref()) {
        return render_error(err, settings.format, None);
    }
    ExitCode::SUCCESS
}
