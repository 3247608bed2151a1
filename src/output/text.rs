//! Plain-text summaries for terminal output.

use crate::aggregator::{BundlingDiagram, ChordDiagram, Diagram};

/// Create a text summary of a diagram
///
/// # Arguments
/// * `diagram` - Diagram to summarize
/// * `max_lines` - Maximum number of table rows
pub fn generate_text_summary(diagram: &Diagram, max_lines: usize) -> String {
    let lines = match diagram {
        Diagram::Chord(chord) => render_edge_table(chord, max_lines),
        Diagram::EdgeBundling(bundling) => render_leaf_table(bundling, max_lines),
    };

    lines.join("\n")
}

fn render_edge_table(chord: &ChordDiagram, max_lines: usize) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("  HEAVIEST PACKAGE CALLS".to_string());
    lines.push(format!("  {}", "-".repeat(84)));
    lines.push(format!(
        "  {:<34} {:<34} {:>6} {:>6}",
        "Callee", "Caller", "Calls", "%"
    ));
    lines.push(format!("  {}", "-".repeat(84)));

    for edge in chord.edges.iter().take(max_lines) {
        let percentage = if chord.pairs_seen > 0 {
            edge.value as f64 / chord.pairs_seen as f64 * 100.0
        } else {
            0.0
        };
        lines.push(format!(
            "  {:<34} {:<34} {:>6} {:>5.1}%",
            shorten(&edge.source, 34),
            shorten(&edge.target, 34),
            edge.value,
            percentage
        ));
    }

    if chord.edges.len() > max_lines {
        lines.push(String::new());
        lines.push(format!(
            "   (Showing top {} of {} edges)",
            max_lines,
            chord.edges.len()
        ));
    }

    lines
}

fn render_leaf_table(bundling: &BundlingDiagram, max_lines: usize) -> Vec<String> {
    let hierarchy = &bundling.hierarchy;
    let mut leaves = hierarchy.leaves();
    // most connected first, stable on ties
    leaves.sort_by_key(|&id| {
        let node = hierarchy.node(id);
        std::cmp::Reverse(node.outgoing.len() + node.incoming.len())
    });

    let mut lines = Vec::new();
    lines.push("  MOST CONNECTED PACKAGES".to_string());
    lines.push(format!("  {}", "-".repeat(60)));
    lines.push(format!("  {:<40} {:>8} {:>8}", "Package", "Callers", "Callees"));
    lines.push(format!("  {}", "-".repeat(60)));

    for &id in leaves.iter().take(max_lines) {
        let node = hierarchy.node(id);
        lines.push(format!(
            "  {:<40} {:>8} {:>8}",
            shorten(&node.name, 40),
            node.outgoing.len(),
            node.incoming.len()
        ));
    }

    if leaves.len() > max_lines {
        lines.push(String::new());
        lines.push(format!(
            "   (Showing top {} of {} leaves)",
            max_lines,
            leaves.len()
        ));
    }

    lines
}

/// Keep the tail of long package names, which is the informative part
fn shorten(name: &str, width: usize) -> String {
    let count = name.chars().count();
    if count <= width {
        return name.to_string();
    }
    let tail: String = name.chars().skip(count - (width - 3)).collect();
    format!("...{}", tail)
}
