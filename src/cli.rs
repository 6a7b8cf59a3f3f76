use clap::{Parser, Subcommand, ValueEnum};
use ftt_lib::{ColorCollisionPolicy, OutputFormat, SourceKind};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ftt")]
#[command(
    version,
    about = "Figma to Tailwind - Extract typography and color tokens into a Tailwind config",
    long_about = "Figma to Tailwind (FTT)\n\nText styles named like `Web/H1 / Title` become fontSize/fontFamily entries, layers named `Colour block` become colors.\n\nModes:\n- extract: run once over a Figma file (key or URL), a local JSON export, or stdin.\n- watch: read one source per line from stdin and re-extract on every line; only the most recent request's result is printed.\n\nUse --help on any subcommand for details."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, help = "Enable verbose (debug) logging on stderr")]
    pub verbose: bool,

    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Optional config file (TOML) to set defaults for the Figma API, output format and color collisions; CLI flags override config"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract tokens from one design document
    Extract {
        #[arg(help = "Figma file key, Figma file URL, local JSON file, or - for stdin")]
        source: String,

        #[arg(long, value_enum, help = "Override source type detection")]
        source_type: Option<SourceType>,

        #[arg(long, value_enum, help = "Output format [default: json, or config output.format]")]
        format: Option<OutputFormat>,

        #[arg(long, short, help = "Output file path (stdout if omitted)")]
        output: Option<PathBuf>,

        #[arg(long, value_enum, help = "How to store distinct colors that share a name")]
        color_collisions: Option<CollisionPolicy>,
    },

    /// Re-extract for every source read from stdin (last request wins)
    Watch {
        #[arg(long, value_enum, help = "Override source type detection")]
        source_type: Option<SourceType>,

        #[arg(long, value_enum, help = "Output format [default: json, or config output.format]")]
        format: Option<OutputFormat>,

        #[arg(long, value_enum, help = "How to store distinct colors that share a name")]
        color_collisions: Option<CollisionPolicy>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SourceType {
    Figma,
    File,
    Stdin,
}

impl From<SourceType> for SourceKind {
    fn from(value: SourceType) -> Self {
        match value {
            SourceType::Figma => SourceKind::Figma,
            SourceType::File => SourceKind::File,
            SourceType::Stdin => SourceKind::Stdin,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CollisionPolicy {
    Overwrite,
    Suffix,
}

impl From<CollisionPolicy> for ColorCollisionPolicy {
    fn from(value: CollisionPolicy) -> Self {
        match value {
            CollisionPolicy::Overwrite => ColorCollisionPolicy::Overwrite,
            CollisionPolicy::Suffix => ColorCollisionPolicy::Suffix,
        }
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::{Cli, CollisionPolicy, Commands, SourceType};
    use clap::Parser;
    use ftt_lib::OutputFormat;

    #[test]
    fn extract_command_uses_defaults() {
        let cli = Cli::parse_from(["ftt", "extract", "AbC123"]);

        assert!(!cli.verbose);
        assert!(cli.config.is_none());

        match cli.command {
            Commands::Extract {
                source,
                source_type,
                format,
                output,
                color_collisions,
            } => {
                assert_eq!(source, "AbC123");
                assert!(source_type.is_none());
                assert!(format.is_none());
                assert!(output.is_none());
                assert!(color_collisions.is_none());
            }
            _ => panic!("expected extract command"),
        }
    }

    #[test]
    fn extract_command_respects_overrides() {
        let cli = Cli::parse_from([
            "ftt",
            "extract",
            "design.json",
            "--source-type",
            "file",
            "--format",
            "tailwind",
            "--output",
            "tailwind.config.js",
            "--color-collisions",
            "suffix",
            "--config",
            "ftt.toml",
        ]);

        assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("ftt.toml")));
        match cli.command {
            Commands::Extract {
                source_type,
                format,
                output,
                color_collisions,
                ..
            } => {
                assert!(matches!(source_type, Some(SourceType::File)));
                assert!(matches!(format, Some(OutputFormat::Tailwind)));
                assert_eq!(
                    output.as_deref(),
                    Some(std::path::Path::new("tailwind.config.js"))
                );
                assert!(matches!(color_collisions, Some(CollisionPolicy::Suffix)));
            }
            _ => panic!("expected extract command with overrides"),
        }
    }

    #[test]
    fn watch_command_sets_verbose() {
        let cli = Cli::parse_from(["ftt", "--verbose", "watch", "--format", "yaml"]);

        assert!(cli.verbose);
        match cli.command {
            Commands::Watch { format, source_type, .. } => {
                assert!(matches!(format, Some(OutputFormat::Yaml)));
                assert!(source_type.is_none());
            }
            _ => panic!("expected watch command"),
        }
    }
}
