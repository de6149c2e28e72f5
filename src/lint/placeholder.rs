//! Placeholder tokens substituted at render time.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

/// `%{name}`, `%(name)s` / `%(name)d`, and `{{name}}`.
#[allow(clippy::expect_used)]
static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"%\{[^}]+\}|%\([^)]+\)[sd]|\{\{[^}]+\}\}").expect("placeholder pattern is valid")
});

/// Distinct placeholder tokens of `text`, as written, sorted.
#[must_use]
pub fn placeholders(text: &str) -> BTreeSet<&str> {
    PLACEHOLDER_RE.find_iter(text).map(|m| m.as_str()).collect()
}
