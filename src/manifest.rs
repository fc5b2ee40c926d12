//! `package.json` for the generated application.

use serde_json::{json, Map, Value};

use crate::placeholder::lookup;
use crate::schema::RegistryEntry;

pub const DEFAULT_APP_NAME: &str = "lowcode-app";
pub const DEFAULT_APP_VERSION: &str = "1.0.0";
pub const LATEST: &str = "latest";

/// Runtime packages every generated application depends on.
const BASE_DEPENDENCIES: &[(&str, &str)] = &[
    ("vue", "^3.3.9"),
    ("vue-router", "^4.2.5"),
    ("pinia", "^2.1.7"),
    ("axios", "^1.6.2"),
    ("axios-mock-adapter", "^1.22.0"),
    ("vue-i18n", "^9.8.0"),
];

const DEV_DEPENDENCIES: &[(&str, &str)] = &[
    ("@vitejs/plugin-vue", "^4.5.1"),
    ("@vitejs/plugin-vue-jsx", "^3.1.0"),
    ("vite", "^5.0.4"),
];

fn text<'a>(context: &'a Value, paths: &[&str]) -> Option<&'a str> {
    paths
        .iter()
        .filter_map(|path| lookup(context, path).and_then(Value::as_str))
        .find(|s| !s.is_empty())
}

/// Registry packages that can be installed from a registry. Relative paths
/// point at local code and are skipped.
fn is_installable(package: &str) -> bool {
    !package.is_empty() && !package.starts_with('.') && !package.starts_with('/')
}

/// Later sources win: base packages, then `context.dependencies`, then the
/// registry. A registry entry without a version never downgrades a pinned one.
fn dependencies(context: &Value, registry: &[RegistryEntry]) -> Map<String, Value> {
    let mut deps: Map<String, Value> = BASE_DEPENDENCIES
        .iter()
        .map(|(name, version)| (name.to_string(), json!(version)))
        .collect();

    if let Some(extra) = context.get("dependencies").and_then(Value::as_object) {
        for (name, version) in extra {
            if version.is_string() {
                deps.insert(name.clone(), version.clone());
            }
        }
    }

    for entry in registry.iter().filter(|e| is_installable(&e.package)) {
        match entry.version.as_deref().filter(|v| !v.is_empty()) {
            Some(version) => {
                deps.insert(entry.package.clone(), json!(version));
            }
            None => {
                deps.entry(entry.package.clone()).or_insert_with(|| json!(LATEST));
            }
        }
    }

    deps
}

/// Pretty-printed `package.json`.
pub fn package_json(context: &Value, registry: &[RegistryEntry]) -> String {
    let name = text(context, &["meta.name", "ia.name"]).unwrap_or(DEFAULT_APP_NAME);
    let description = text(context, &["meta.description", "ia.description"]).unwrap_or("");

    let dev_dependencies: Map<String, Value> = DEV_DEPENDENCIES
        .iter()
        .map(|(name, version)| (name.to_string(), json!(version)))
        .collect();

    let manifest = json!({
        "name": name,
        "version": DEFAULT_APP_VERSION,
        "description": description,
        "scripts": {
            "dev": "vite",
            "build": "vite build",
            "preview": "vite preview"
        },
        "main": "dist/index.js",
        "module": "dist/index.js",
        "dependencies": dependencies(context, registry),
        "devDependencies": dev_dependencies
    });

    format!("{:#}\n", manifest)
}
