//! Render command implementation.
//!
//! The render command:
//! 1. Resolves options (CLI flags, config file, defaults)
//! 2. Reads the event batch
//! 3. Builds the requested diagram
//! 4. Writes the diagram JSON (file or stdout)
//! 5. Optionally prints a text summary (stderr when the JSON went to stdout)

use crate::aggregator::{build_diagram, DiagramOptions};
use crate::commands::models::RenderArgs;
use crate::output::{diagram_to_string, generate_text_summary, read_events, write_diagram};
use crate::parser::DecodePolicy;
use crate::utils::config::{load_config, FileConfig, MAX_CONFIGURABLE_EDGES, MAX_PACKAGE_DEPTH};
use anyhow::{Context, Result};
use log::{debug, info};
use std::time::Instant;

/// Execute the render command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Config file or event file cannot be read
/// * A malformed frame under the strict policy
/// * Output cannot be written
pub fn execute_render(args: RenderArgs) -> Result<()> {
    let start_time = Instant::now();

    let options = resolve_options(&args)?;
    debug!("Resolved options: {:?}", options);

    info!("Reading events from: {}", args.input.display());
    let batch = read_events(&args.input)
        .with_context(|| format!("Failed to read events from {}", args.input.display()))?;

    let diagram = build_diagram(&batch, &options).context("Failed to build diagram")?;

    match &args.output {
        Some(path) => {
            write_diagram(&diagram, path).context("Failed to write diagram JSON")?;
            info!("Diagram written to: {}", path.display());
        }
        None => {
            println!(
                "{}",
                diagram_to_string(&diagram).context("Failed to serialize diagram")?
            );
        }
    }

    if args.print_summary {
        let summary = format!(
            "\n  {}\n\n{}",
            diagram.summary(),
            generate_text_summary(&diagram, args.summary_rows)
        );
        if args.output.is_some() {
            println!("{}", summary);
        } else {
            // stdout already carries the diagram JSON
            eprintln!("{}", summary);
        }
    }

    info!(
        "Render completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}

/// Merge CLI flags over the config file over built-in defaults
///
/// **Public** - exposed so callers can see the effective options
pub fn resolve_options(args: &RenderArgs) -> Result<DiagramOptions> {
    let file = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config file {}", path.display()))?,
        None => FileConfig::default(),
    };

    let defaults = DiagramOptions::default();
    let skip_malformed = args.skip_malformed || file.skip_malformed.unwrap_or(false);

    let options = DiagramOptions {
        levels: args.levels.or(file.levels).unwrap_or(defaults.levels),
        kind: args.kind.or(file.kind).unwrap_or(defaults.kind),
        max_edges: args.max_edges.or(file.max_edges).unwrap_or(defaults.max_edges),
        policy: if skip_malformed {
            DecodePolicy::SkipEvent
        } else {
            DecodePolicy::Strict
        },
    };

    validate_options(&options)?;
    Ok(options)
}

/// Validate render arguments
///
/// **Public** - can be called before execute_render for early validation
pub fn validate_args(args: &RenderArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input path cannot be empty");
    }

    if let Some(levels) = args.levels {
        if levels > MAX_PACKAGE_DEPTH {
            anyhow::bail!("levels is too large (max {})", MAX_PACKAGE_DEPTH);
        }
    }

    if let Some(max_edges) = args.max_edges {
        if max_edges == 0 {
            anyhow::bail!("max_edges must be greater than 0");
        }
        if max_edges > MAX_CONFIGURABLE_EDGES {
            anyhow::bail!("max_edges is too large (max {})", MAX_CONFIGURABLE_EDGES);
        }
    }

    if args.print_summary && args.summary_rows == 0 {
        anyhow::bail!("summary_rows must be greater than 0");
    }

    Ok(())
}

fn validate_options(options: &DiagramOptions) -> Result<()> {
    if options.levels > MAX_PACKAGE_DEPTH {
        anyhow::bail!("levels is too large (max {})", MAX_PACKAGE_DEPTH);
    }
    if options.max_edges == 0 || options.max_edges > MAX_CONFIGURABLE_EDGES {
        anyhow::bail!("max_edges must be within 1..={}", MAX_CONFIGURABLE_EDGES);
    }
    Ok(())
}
