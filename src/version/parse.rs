//! Version token extraction from command output.

use regex::Regex;
use std::sync::LazyLock;

/// Patterns tried in order, most specific first.
const VERSION_PATTERNS: [&str; 2] = [r"\d+\.\d+\.\d+", r"\d+\.\d+"];

static VERSION_REGEXES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    VERSION_PATTERNS
        .iter()
        .filter_map(|pattern| Regex::new(pattern).ok())
        .collect()
});

/// Extract the first dotted-numeric version from arbitrary text.
///
/// Three-component versions win over two-component ones even when the
/// shorter match appears earlier in the text. Returns `None` when no
/// pattern matches.
pub fn extract_version(output: &str) -> Option<String> {
    VERSION_REGEXES
        .iter()
        .find_map(|re| re.find(output))
        .map(|m| m.as_str().to_string())
}
