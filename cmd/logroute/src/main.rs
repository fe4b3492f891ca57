//! Logroute CLI - compile logging flows into daemon configuration.
//!
//! Commands:
//! - `logroute compile` - Render a resource bundle to daemon configuration
//! - `logroute check` - Render and dry-run the configuration with the daemon
//! - `logroute explain` - Generate a routing report

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "logroute")]
#[command(about = "Compile logging flows and outputs into log daemon configuration")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

/// Options shared by every command that loads a bundle.
#[derive(clap::Args)]
struct Source {
    /// Path to the resource bundle (.yaml, .yml or .json)
    #[arg(short, long, default_value = "bundle.yaml")]
    bundle: String,

    /// Name of the Logging resource to compile (defaults to the only one)
    #[arg(short, long)]
    logging: Option<String>,

    /// Routing tag prefix isolating this logging system
    #[arg(long, default_value = "")]
    tag_prefix: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a resource bundle to daemon configuration
    Compile {
        #[command(flatten)]
        source: Source,

        /// Output path for the rendered configuration
        #[arg(short, long, default_value = "fluent.conf")]
        output: String,

        /// Output format (fluentd or json)
        #[arg(short, long, default_value = "fluentd")]
        format: String,

        /// Write a config lock next to the output
        #[arg(long)]
        lock: bool,
    },

    /// Render a bundle and dry-run it with the log daemon
    Check {
        #[command(flatten)]
        source: Source,

        /// Daemon executable used for the dry run
        #[arg(long, default_value = "fluentd")]
        daemon: String,
    },

    /// Generate a report explaining the routing
    Explain {
        #[command(flatten)]
        source: Source,

        /// Output path for the report
        #[arg(short, long, default_value = "routing.md")]
        output: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    match cli.log_format {
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
    }

    match cli.command {
        Commands::Compile {
            source,
            output,
            format,
            lock,
        } => commands::compile::run(&source.into(), &output, &format, lock),
        Commands::Check { source, daemon } => commands::check::run(&source.into(), &daemon),
        Commands::Explain { source, output } => commands::explain::run(&source.into(), &output),
    }
}

impl From<Source> for commands::Selection {
    fn from(source: Source) -> Self {
        Self {
            bundle: source.bundle,
            logging: source.logging,
            tag_prefix: source.tag_prefix,
        }
    }
}
