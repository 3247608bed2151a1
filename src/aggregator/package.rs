//! Package name truncation.
//!
//! Keeps at most `levels` leading dot-separated segments of a package name.
//! `levels == 0` truncates everything away.

/// Ancestor package names from depth 1 up to `min(levels, segments)`
///
/// # Example
/// ```
/// use depview::aggregator::package::lineage;
/// assert_eq!(lineage("com.foo.bar", 2), vec!["com", "com.foo"]);
/// ```
pub fn lineage(package: &str, levels: usize) -> Vec<String> {
    if package.is_empty() || levels == 0 {
        return Vec::new();
    }

    let mut names = Vec::with_capacity(levels.min(8));
    let mut end = 0;

    for (depth, segment) in package.split('.').enumerate() {
        if depth >= levels {
            break;
        }
        end += if depth == 0 { segment.len() } else { segment.len() + 1 };
        names.push(package[..end].to_string());
    }

    names
}

/// Truncated package name: the deepest entry of the lineage
pub fn truncate(package: &str, levels: usize) -> String {
    if levels == 0 {
        return String::new();
    }

    match package.match_indices('.').nth(levels - 1) {
        Some((index, _)) => package[..index].to_string(),
        None => package.to_string(),
    }
}

/// Number of dot-separated segments in a package name
pub fn segment_count(package: &str) -> usize {
    if package.is_empty() {
        0
    } else {
        package.split('.').count()
    }
}
