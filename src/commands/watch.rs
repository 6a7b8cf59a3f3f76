use std::path::PathBuf;
use std::process::ExitCode;

use futures::stream::{FuturesUnordered, StreamExt};
use ftt_lib::{
    parse_source, Completion, Config, ErrorOutput, FttError, FttOutput, OutputFormat, ParsedSource,
    PipelineOptions, Session, SessionState, SourceDescriptor, SourceKind, Ticket, TokensOutput,
    FTT_OUTPUT_VERSION,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

use crate::cli::{CollisionPolicy, SourceType};
use crate::formatting::{render_error, write_output};
use crate::settings::{load_config, resolve_settings};
use crate::source::load_document;

/// Run the watch command: one source per stdin line, newest request wins.
pub async fn run_watch(
    config_path: Option<PathBuf>,
    source_type: Option<SourceType>,
    format: Option<OutputFormat>,
    color_collisions: Option<CollisionPolicy>,
) -> ExitCode {
    let config = match load_config(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format.unwrap_or_default(), None),
    };
    let settings = resolve_settings(format, color_collisions, &config);
    let session = Session::new();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pending = FuturesUnordered::new();
    let mut eof = false;

    loop {
        tokio::select! {
            line = lines.next_line(), if !eof => match line {
                Ok(Some(line)) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    // Tickets follow line order, whatever order the runs get polled in.
                    let ticket = session.begin();
                    match parse_watch_source(line, source_type) {
                        Ok(parsed) => {
                            pending.push(refresh(
                                &session,
                                ticket,
                                parsed,
                                settings.pipeline,
                                &config,
                            ));
                        }
                        Err(err) => {
                            let completion = session.complete(ticket, line, Err(err)).await;
                            emit(&completion, SourceKind::File, settings.format);
                        }
                    }
                }
                Ok(None) => {
                    debug!("stdin closed; waiting for in-flight runs");
                    eof = true;
                }
                Err(err) => return render_error(FttError::Io(err), settings.format, None),
            },
            Some((kind, completion)) = pending.next(), if !pending.is_empty() => {
                emit(&completion, kind, settings.format);
            }
            else => break,
        }
    }
    ExitCode::SUCCESS
}

fn parse_watch_source(
    line: &str,
    source_type: Option<SourceType>,
) -> Result<ParsedSource, FttError> {
    let parsed = parse_source(line, source_type.map(Into::into))
        .map_err(|err| FttError::Config(err.to_string()))?;
    if parsed.kind == SourceKind::Stdin {
        return Err(FttError::Config(
            "stdin is reserved for watch requests; pass a Figma key, URL or file path".to_string(),
        ));
    }
    Ok(parsed)
}

async fn refresh(
    session: &Session,
    ticket: Ticket,
    parsed: ParsedSource,
    options: PipelineOptions,
    config: &Config,
) -> (SourceKind, Completion) {
    let kind = parsed.kind;
    let label = parsed.value.clone();
    let completion = session
        .run_with(ticket, &label, &options, |_| async move {
            load_document(&parsed, config).await
        })
        .await;
    (kind, completion)
}

fn emit(completion: &Completion, kind: SourceKind, format: OutputFormat) {
    let body = match completion {
        Completion::Stale { ticket, latest } => {
            debug!(
                ticket = ticket.generation(),
                latest = latest.generation(),
                "superseded result dropped"
            );
            return;
        }
        Completion::Published(SessionState::Idle) => return,
        Completion::Published(SessionState::Ready {
            source, snapshot, ..
        }) => FttOutput::Tokens(TokensOutput::new(
            SourceDescriptor {
                kind,
                value: source.clone(),
            },
            snapshot.clone(),
        )),
        Completion::Published(SessionState::Failed { source, error, .. }) => {
            warn!(source = %source, message = %error.message, "extraction failed");
            FttOutput::Error(ErrorOutput {
                version: FTT_OUTPUT_VERSION.to_string(),
                message: Some(error.message.clone()),
                error: error.clone(),
            })
        }
    };
    if let Err(err) = write_output(&body, format, None) {
        warn!("failed to write output: {err}");
    }
}
