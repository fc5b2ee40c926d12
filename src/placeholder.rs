//! Placeholder substitution for scaffold templates.
//!
//! Markers have the form `MARK{dotted.path}END`. Each marker is replaced by the
//! value found at `dotted.path` inside the context, or by the empty string when
//! any segment is missing.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde_json::Value;

lazy_static! {
    static ref PLACEHOLDER_RE: Regex = Regex::new(r"MARK\{([^{}]*)\}END").unwrap();
}

/// Stamp `context` into `template` in a single pass.
pub fn substitute(context: &Value, template: &str) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures| {
            lookup(context, &caps[1]).map(stringify).unwrap_or_default()
        })
        .into_owned()
}

/// Optional-chained lookup of a dotted path. Numeric segments index arrays.
pub fn lookup<'a>(context: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return None;
    }

    path.split('.').try_fold(context, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
