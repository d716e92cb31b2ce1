//! Dotted-numeric version comparison.

use std::cmp::Ordering;

/// Parse a dotted-numeric version into its integer components.
///
/// Returns `None` if any component is not a non-negative integer.
fn parse_components(version: &str) -> Option<Vec<u64>> {
    version
        .split('.')
        .map(|part| part.parse::<u64>().ok())
        .collect()
}

/// Compare two dotted-numeric versions.
///
/// The shorter version is right-padded with zeros, so `2.1` and `2.1.0`
/// are equal. Returns `None` if either side does not parse.
pub fn compare_versions(a: &str, b: &str) -> Option<Ordering> {
    let mut left = parse_components(a)?;
    let mut right = parse_components(b)?;

    let len = left.len().max(right.len());
    left.resize(len, 0);
    right.resize(len, 0);

    Some(left.cmp(&right))
}

/// Whether `current` is at least `minimum`.
///
/// Fails open: if either version cannot be parsed the check passes, so
/// noisy probe output never turns an installed dependency into a missing one.
pub fn version_satisfies(current: &str, minimum: &str) -> bool {
    match compare_versions(current, minimum) {
        Some(ordering) => ordering != Ordering::Less,
        None => {
            tracing::debug!(
                "Cannot compare version '{}' against '{}', treating as satisfied",
                current,
                minimum
            );
            true
        }
    }
}
