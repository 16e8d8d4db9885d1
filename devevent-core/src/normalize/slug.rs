//! Title to slug derivation

use once_cell::sync::Lazy;
use regex::Regex;

static DISALLOWED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9\s-]").expect("invalid slug strip regex"));

static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("invalid whitespace regex"));

static HYPHEN_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-+").expect("invalid hyphen regex"));

/// Derive the URL slug for an event title.
///
/// Lowercases, drops anything outside `[a-z0-9]`, whitespace and `-`, turns
/// whitespace runs into a single hyphen and trims hyphens from both ends.
///
/// ```
/// use devevent_core::derive_slug;
///
/// assert_eq!(derive_slug("Hello, World!  2024"), "hello-world-2024");
/// ```
pub fn derive_slug(title: &str) -> String {
    let lowered = title.to_lowercase();
    let stripped = DISALLOWED_RE.replace_all(lowered.trim(), "");
    let hyphenated = WHITESPACE_RE.replace_all(&stripped, "-");
    let collapsed = HYPHEN_RUN_RE.replace_all(&hyphenated, "-");
    collapsed.trim_matches('-').to_owned()
}
