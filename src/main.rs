//! depview CLI
//!
//! Builds package dependency diagrams (chord or edge bundling) from a
//! batch of recorded profiling events.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use depview::aggregator::DiagramKind;
use depview::commands::{
    display_version, execute_render, inspect_events, validate_args, InspectArgs, RenderArgs,
};

/// depview - package dependency diagrams from stack traces
#[derive(Parser, Debug)]
#[command(name = "depview")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a diagram from an event batch
    Render {
        /// Path to the event batch JSON
        #[arg(short, long)]
        input: PathBuf,

        /// Output path for the diagram JSON (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Package depth to truncate to
        #[arg(short, long, env = "DEPVIEW_LEVELS")]
        levels: Option<usize>,

        /// Diagram kind: chord or edge-bundling
        #[arg(short, long)]
        kind: Option<DiagramKind>,

        /// Maximum number of chord edges
        #[arg(long)]
        max_edges: Option<usize>,

        /// Drop events with malformed frames instead of failing
        #[arg(long)]
        skip_malformed: bool,

        /// TOML config file
        #[arg(short, long, env = "DEPVIEW_CONFIG")]
        config: Option<PathBuf>,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,

        /// Rows in the text summary
        #[arg(long, default_value = "10")]
        summary_rows: usize,
    },

    /// Show counts for an event batch file
    Inspect {
        /// Path to the event batch JSON
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Render {
            input,
            output,
            levels,
            kind,
            max_edges,
            skip_malformed,
            config,
            summary,
            summary_rows,
        } => {
            let args = RenderArgs {
                input,
                output,
                levels,
                kind,
                max_edges,
                skip_malformed,
                config,
                print_summary: summary,
                summary_rows,
            };

            // Validate args first
            validate_args(&args)?;

            execute_render(args)?;
        }

        Commands::Inspect { input } => {
            inspect_events(&InspectArgs { input })?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
