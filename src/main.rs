mod cli;
mod commands;
mod formatting;
mod settings;
mod source;

use std::process::ExitCode;

use cli::Commands;
use commands::{run_extract, run_watch};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> ExitCode {
    run().await
}

async fn run() -> ExitCode {
    let args = cli::parse();
    init_tracing(args.verbose);

    match args.command {
        Commands::Extract {
            source,
            source_type,
            format,
            output,
            color_collisions,
        } => {
            run_extract(
                args.config,
                source,
                source_type,
                format,
                output,
                color_collisions,
            )
            .await
        }
        Commands::Watch {
            source_type,
            format,
            color_collisions,
        } => run_watch(args.config, source_type, format, color_collisions).await,
    }
}

/// Logs go to stderr so stdout stays machine-readable. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "ftt=debug,ftt_lib=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}
