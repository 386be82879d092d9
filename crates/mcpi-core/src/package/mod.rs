//! Package identifiers and manifests.

pub mod manifest;

use std::collections::BTreeMap;

pub use manifest::{ExecutableTarget, MANIFEST_FILE, PackageManifest};

/// Derive the server key for a registry package name.
///
/// npm scopes are dropped (`@scope/pkg` becomes `pkg`); anything else is
/// used verbatim.
pub fn server_key(package: &str) -> &str {
    match package.strip_prefix('@').and_then(|rest| rest.split_once('/')) {
        Some((_, name)) if !name.is_empty() => name,
        _ => package,
    }
}

/// Parse `KEY=VALUE` assignments into an environment map.
///
/// Splits on the first `=` only, so values may contain `=`. An assignment
/// without `=` maps the whole text to an empty value. Later duplicates win.
pub fn parse_env_assignments<S: AsRef<str>>(assignments: &[S]) -> BTreeMap<String, String> {
    assignments
        .iter()
        .map(|assignment| {
            let assignment = assignment.as_ref();
            match assignment.split_once('=') {
                Some((key, value)) => (key.to_string(), value.to_string()),
                None => (assignment.to_string(), String::new()),
            }
        })
        .collect()
}
