use std::sync::LazyLock;

use regex::{Captures, Regex};

/// `{{ env.VAR }}` or `{{ env.VAR | default("fallback") }}`
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\{\{\s*([A-Za-z0-9_.]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#).expect("must be valid regex")
});

/// Substitute environment placeholders in raw TOML text
///
/// Comment lines are copied through untouched so that commented-out
/// settings never require their variables to be set.
pub(crate) fn expand_env(input: &str) -> Result<String, String> {
    let mut expanded = String::with_capacity(input.len());

    for (index, line) in input.split_inclusive('\n').enumerate() {
        if line.trim_start().starts_with('#') {
            expanded.push_str(line);
            continue;
        }

        let mut failure = None;
        let replaced = PLACEHOLDER.replace_all(line, |captures: &Captures<'_>| {
            match resolve(&captures[1], captures.get(2).map(|m| m.as_str())) {
                Ok(value) => value,
                Err(message) => {
                    failure.get_or_insert(message);
                    String::new()
                }
            }
        });

        if let Some(message) = failure {
            return Err(format!("line {}: {message}", index + 1));
        }

        expanded.push_str(&replaced);
    }

    Ok(expanded)
}

fn resolve(key: &str, default: Option<&str>) -> Result<String, String> {
    let var = key
        .strip_prefix("env.")
        .filter(|var| !var.is_empty() && !var.contains('.'))
        .ok_or_else(|| format!("only variables scoped with 'env.' are supported: `{key}`"))?;

    match std::env::var(var) {
        Ok(value) => Ok(value),
        Err(_) => default
            .map(str::to_owned)
            .ok_or_else(|| format!("environment variable not found: `{var}`")),
    }
}
