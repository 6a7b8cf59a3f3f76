use std::fmt::Write as FmtWrite;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use ftt_lib::{ErrorOutput, FttError, FttOutput, OutputFormat, TokenConfiguration, FTT_OUTPUT_VERSION};

/// Write output in the requested format.
pub fn write_output(
    body: &FttOutput,
    format: OutputFormat,
    output: Option<&Path>,
) -> ftt_lib::Result<()> {
    let content = match format {
        OutputFormat::Json => serde_json::to_string(body)?,
        OutputFormat::Pretty => return Ok(write_pretty_output(body, output)?),
        OutputFormat::Yaml => serde_yaml::to_string(body)
            .map_err(|err| FttError::Config(format!("Failed to render YAML: {err}")))?,
        OutputFormat::Tailwind => match body {
            FttOutput::Tokens(tokens) => tailwind_module(&tokens.configuration)?,
            // There is no module to emit for an error; keep the JSON envelope.
            FttOutput::Error(_) => serde_json::to_string(body)?,
        },
    };
    write_content(&content, output)?;
    Ok(())
}

/// Render an error and return the appropriate exit code.
pub fn render_error(err: FttError, format: OutputFormat, output: Option<PathBuf>) -> ExitCode {
    let error_payload = err.to_payload();
    let payload = FttOutput::Error(ErrorOutput {
        version: FTT_OUTPUT_VERSION.to_string(),
        message: Some(error_payload.message.clone()),
        error: error_payload,
    });

    if let Err(write_err) = write_output(&payload, format, output.as_deref()) {
        eprintln!("Failed to write error output: {}", write_err);
        let fallback =
            serde_json::to_string(&payload).unwrap_or_else(|_| "{\"mode\":\"error\"}".into());
        println!("{fallback}");
    }

    // Every failure is fatal for this tool.
    ExitCode::from(2)
}

/// `module.exports = {...};` for the assembled configuration.
pub fn tailwind_module(configuration: &TokenConfiguration) -> serde_json::Result<String> {
    let body = serde_json::to_string_pretty(configuration)?;
    Ok(format!("module.exports = {body};"))
}

fn write_content(content: &str, output: Option<&Path>) -> io::Result<()> {
    if let Some(path) = output {
        std::fs::write(path, content)?;
    } else {
        println!("{}", content.trim_end_matches('\n'));
    }
    Ok(())
}

/// Write pretty output to file or stdout.
fn write_pretty_output(body: &FttOutput, output: Option<&Path>) -> io::Result<()> {
    let stdout_is_tty = std::io::stdout().is_terminal();
    let use_human = output.is_none() && stdout_is_tty;

    if use_human {
        let content = format_pretty(body, true);
        println!("{content}");
        return Ok(());
    }

    // Non-tty or file output: keep JSON shape for pipelines/files.
    let content =
        serde_json::to_string_pretty(body).unwrap_or_else(|_| "{\"mode\":\"error\"}".to_string());
    write_content(&content, output)
}

/// Format output for human consumption in a terminal.
pub fn format_pretty(body: &FttOutput, colorize: bool) -> String {
    match body {
        FttOutput::Tokens(out) => {
            let mut buf = String::new();
            let header = color("[TOKENS]", "32", colorize);
            writeln!(
                buf,
                "{} {} typography, {} colors",
                header,
                out.typography.len(),
                out.colors.len()
            )
            .ok();
            writeln!(buf, "Source: {} (kind: {:?})", out.source.value, out.source.kind).ok();

            if !out.typography.is_empty() {
                writeln!(buf, "Typography:").ok();
                for token in &out.typography {
                    let style = &token.style;
                    writeln!(
                        buf,
                        "- {:6} {}px/{}px {} {}",
                        token.class_name,
                        style.font_size,
                        style.line_height_px,
                        style.font_family,
                        style.font_weight
                    )
                    .ok();
                }
            }

            if !out.colors.is_empty() {
                writeln!(buf, "Colors:").ok();
                for token in &out.colors {
                    writeln!(buf, "- {:16} {}", token.name, color(&token.color, "36", colorize))
                        .ok();
                }
            }
            buf
        }
        FttOutput::Error(out) => {
            let mut buf = String::new();
            let header = color("[ERROR]", "31", colorize);
            let message = out
                .message
                .as_deref()
                .unwrap_or(out.error.message.as_str());
            writeln!(buf, "{} {}", header, message).ok();
            if let Some(remediation) = &out.error.remediation {
                writeln!(buf, "Hint: {}", remediation).ok();
            }
            buf
        }
    }
}

/// Apply ANSI color codes when enabled.
fn color(text: &str, code: &str, colorize: bool) -> String {
    if colorize {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}
