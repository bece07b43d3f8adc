use anyhow::Result;
use clap::{Parser, Subcommand};
use confdesc::commands::{check_command, parse_command, OutputFormat};
use confdesc::init_tracing;

/// Reader for XML config descriptions.
///
/// This CLI is a thin wrapper around `confdesc-core` (exposed in code as `confdesc_core`).
/// All substantive logic lives in the library so it can be tested thoroughly
/// and reused from other frontends.
#[derive(Parser, Debug)]
#[command(name = "confdesc", version, about = "Decode XML config descriptions", long_about = None)]
struct Cli {
    /// Log decoding steps (overridden by RUST_LOG).
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the library version.
    Version,

    /// Decode a config description document and print the descriptors.
    Parse {
        /// Path to the XML document.
        #[arg(long)]
        file: String,

        /// Inferred URI used for `config-description` nodes without their own `uri`.
        #[arg(long)]
        uri: Option<String>,

        /// Parser config file (JSON or YAML).
        #[arg(long)]
        config: Option<String>,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false, conflicts_with = "yaml")]
        json: bool,

        /// Emit YAML instead of human-readable text.
        #[arg(long, default_value_t = false)]
        yaml: bool,
    },

    /// Validate a config description document without printing its contents.
    Check {
        /// Path to the XML document.
        #[arg(long)]
        file: String,

        /// Inferred URI used for `config-description` nodes without their own `uri`.
        #[arg(long)]
        uri: Option<String>,

        /// Parser config file (JSON or YAML).
        #[arg(long)]
        config: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Default to the Version command if none is provided.
    match cli.command.unwrap_or(Command::Version) {
        Command::Version => println!("confdesc v{}", confdesc_core::version()),
        Command::Parse { file, uri, config, json, yaml } => parse_command(
            &file,
            uri.as_deref(),
            config.as_deref(),
            OutputFormat::from_flags(json, yaml),
        )?,
        Command::Check { file, uri, config } => {
            check_command(&file, uri.as_deref(), config.as_deref())?
        }
    }

    Ok(())
}
