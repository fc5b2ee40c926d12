//! Generator configuration.
//!
//! Every field has a default, so partial JSON such as
//! `{ "scriptConfig": { "lang": "ts" } }` is a valid configuration.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_FRAGMENT_BASE_PATH: &str = "../components";
pub const DEFAULT_FRAGMENT_SUFFIX: &str = ".vue";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorConfig {
    /// Directory blocks are imported from, relative to the generated document.
    pub fragment_base_path: String,
    pub fragment_suffix: String,
    pub script_config: ScriptConfig,
    pub style_config: StyleConfig,
    /// Emit a `<script setup>` section built from the generation context.
    pub emit_script: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            fragment_base_path: DEFAULT_FRAGMENT_BASE_PATH.to_string(),
            fragment_suffix: DEFAULT_FRAGMENT_SUFFIX.to_string(),
            script_config: ScriptConfig::default(),
            style_config: StyleConfig::default(),
            emit_script: false,
        }
    }
}

impl GeneratorConfig {
    /// Copy with empty fields replaced by defaults and trailing `/` stripped
    /// from the base path.
    pub fn normalized(&self) -> Self {
        let mut config = self.clone();

        let trimmed = config.fragment_base_path.trim_end_matches('/');
        config.fragment_base_path = match (trimmed.is_empty(), self.fragment_base_path.is_empty()) {
            (_, true) => DEFAULT_FRAGMENT_BASE_PATH.to_string(),
            (true, false) => "/".to_string(),
            (false, false) => trimmed.to_string(),
        };
        if config.fragment_suffix.is_empty() {
            config.fragment_suffix = DEFAULT_FRAGMENT_SUFFIX.to_string();
        }

        config
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScriptConfig {
    pub lang: String,
    pub setup: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            lang: String::new(),
            setup: true,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleConfig {
    pub scoped: bool,
    pub lang: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            scoped: true,
            lang: String::new(),
            extra: Map::new(),
        }
    }
}

/// Shallow-merge the keys of `patch` over `current`, one key at a time.
///
/// A `null` over a boolean field reads as `false`, over a string field as `""`.
/// Keys whose value does not fit the typed field (for example `"setup": "yes"`)
/// are skipped; the rest of the patch still applies. Returns `None` only when
/// `patch` is not an object.
pub fn merge_config<T>(current: &T, patch: &Value) -> Option<T>
where
    T: Serialize + DeserializeOwned,
{
    let patch = patch.as_object()?;
    let mut merged = match serde_json::to_value(current).ok()? {
        Value::Object(map) => map,
        _ => return None,
    };
    let mut result: T = serde_json::from_value(Value::Object(merged.clone())).ok()?;

    for (key, value) in patch {
        let value = match (value, merged.get(key)) {
            (Value::Null, Some(Value::Bool(_))) => Value::Bool(false),
            (Value::Null, Some(Value::String(_))) => Value::String(String::new()),
            _ => value.clone(),
        };

        let mut candidate = merged.clone();
        candidate.insert(key.clone(), value);
        match serde_json::from_value::<T>(Value::Object(candidate.clone())) {
            Ok(next) => {
                merged = candidate;
                result = next;
            }
            Err(e) => tracing::debug!(key = %key, error = %e, "skipping config key"),
        }
    }

    Some(result)
}
