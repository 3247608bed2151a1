use crate::commands::models::InspectArgs;
use crate::output::read_events;
use crate::parser::{batch_stats, BatchStats};
use crate::utils::config::{MAX_CHORD_EDGES, MAX_PACKAGE_DEPTH, SCHEMA_VERSION};
use anyhow::{Context, Result};

/// Inspect an event batch file
pub fn inspect_events(args: &InspectArgs) -> Result<BatchStats> {
    println!("Inspecting events: {}", args.input.display());

    let batch = read_events(&args.input)
        .with_context(|| format!("Failed to read events from {}", args.input.display()))?;
    let stats = batch_stats(&batch);

    println!("✓ Valid event batch JSON");
    println!("  Events:             {}", stats.events);
    println!("  Events with stacks: {}", stats.events_with_stacks);
    println!("  Frames:             {}", stats.frames);
    println!("  Malformed frames:   {}", stats.malformed_frames);

    if stats.malformed_frames > 0 {
        println!("  (render with --skip-malformed to drop the affected events)");
    }

    Ok(stats)
}

/// Display version information
pub fn display_version() {
    println!("depview v{}", env!("CARGO_PKG_VERSION"));
    println!("Output Schema: v{}", SCHEMA_VERSION);
    println!("Package depth: 0..={} | Chord edge cap: {}", MAX_PACKAGE_DEPTH, MAX_CHORD_EDGES);
    println!();
    println!("Package dependency diagrams from profiling-event stack traces.");
}
