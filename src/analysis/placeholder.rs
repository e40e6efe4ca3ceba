//! Placeholder extraction for Octopus-style variable substitution
//!
//! Octopus substitutes `#{Variable.Name}` tokens in step properties and
//! config files at deploy time. This module finds those tokens in arbitrary
//! text. The delimiter pair is fixed: a literal `#{` opens a placeholder and
//! the first following `}` closes it - there is no escaping and nested braces
//! are not balanced.

use regex::Regex;
use std::sync::LazyLock;

/// The one substitution pattern the audit honors: `#{name}`
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#\{([^}]*)\}").expect("placeholder pattern is valid"));

/// Iterate over the variable names referenced by placeholders in `text`
///
/// Yields the inner name of every `#{...}` occurrence in left-to-right order.
/// Text without placeholders yields nothing; this never fails. Matching is
/// purely lexical - the names are not validated or resolved.
///
/// # Examples
///
/// ```
/// use octaudit::analysis::placeholders;
///
/// let names: Vec<&str> = placeholders("Server=#{Db.Host};Port=#{Db.Port}").collect();
/// assert_eq!(names, vec!["Db.Host", "Db.Port"]);
/// ```
pub fn placeholders(text: &str) -> impl Iterator<Item = &str> {
    PLACEHOLDER.captures_iter(text).map(|caps| {
        // Group 1 always exists when the pattern matches
        caps.get(1).map_or("", |m| m.as_str())
    })
}
