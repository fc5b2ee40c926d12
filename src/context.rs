//! Per-document generation state and the hook API exposed to renderers.
//!
//! A [`GenerationContext`] is created for every assembled document and never
//! shared. Renderers only see it through [`GenerationHooks`].
//!
//! ## Conflict policy
//!
//! - state and method keys are write-once, a second write returns `false`;
//! - a package gets at most one default (non-destructured) import;
//! - statements with an empty value are dropped.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::config::{merge_config, GeneratorConfig, ScriptConfig, StyleConfig};
use crate::imports::{ImportMap, ResolvedImports};
use crate::schema::{RegistryEntry, SchemaNode};

// ═══════════════════════════════════════════════════════════════════════════════
// STATEMENTS
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatementPosition {
    AfterImport,
    BeforeProps,
    AfterProps,
    BeforeState,
    AfterState,
    BeforeMethods,
    AfterMethods,
}

impl StatementPosition {
    pub const ALL: [StatementPosition; 7] = [
        StatementPosition::AfterImport,
        StatementPosition::BeforeProps,
        StatementPosition::AfterProps,
        StatementPosition::BeforeState,
        StatementPosition::AfterState,
        StatementPosition::BeforeMethods,
        StatementPosition::AfterMethods,
    ];

    fn index(self) -> usize {
        self as usize
    }

    pub fn parse(name: &str) -> Option<Self> {
        serde_json::from_value(Value::String(name.to_string())).ok()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    /// Unknown or absent positions land in `AFTER_METHODS`.
    #[serde(default, deserialize_with = "lenient_position")]
    pub position: Option<StatementPosition>,
    #[serde(default)]
    pub value: String,
}

impl Statement {
    pub fn new(position: StatementPosition, value: impl Into<String>) -> Self {
        Self {
            position: Some(position),
            value: value.into(),
        }
    }
}

fn lenient_position<'de, D>(deserializer: D) -> Result<Option<StatementPosition>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(StatementPosition::parse))
}

/// Statement buckets keyed by position, each in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatementBuckets {
    buckets: [Vec<String>; 7],
}

impl StatementBuckets {
    pub fn get(&self, position: StatementPosition) -> &[String] {
        &self.buckets[position.index()]
    }

    fn push(&mut self, position: StatementPosition, value: String) {
        self.buckets[position.index()].push(value);
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// HOOK API
// ═══════════════════════════════════════════════════════════════════════════════

/// Capabilities a template renderer may use while walking a schema.
pub trait GenerationHooks {
    /// Returns `false` when the statement value is empty.
    fn add_statement(&mut self, statement: Statement) -> bool;
    /// Returns `false` without writing when `key` already exists.
    fn add_method(&mut self, key: &str, value: Value) -> bool;
    /// Returns `false` without writing when `key` already exists.
    fn add_state(&mut self, key: &str, value: Value) -> bool;
    /// Returns `false` when a second default import for `from_path` is attempted.
    fn add_import(&mut self, from_path: &str, import: RegistryEntry) -> bool;
    /// Non-object input is ignored.
    fn set_script_config(&mut self, config: &Value);
    fn script_config(&self) -> &ScriptConfig;
    /// Non-object input is ignored.
    fn set_style_config(&mut self, config: &Value);
    fn style_config(&self) -> &StyleConfig;
    fn add_css(&mut self, css: &str);
}

// ═══════════════════════════════════════════════════════════════════════════════
// GENERATION CONTEXT
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default)]
pub struct GenerationContext {
    pub package_imports: ImportMap,
    pub fragment_imports: ImportMap,
    pub state: Map<String, Value>,
    pub methods: Map<String, Value>,
    pub life_cycles: Map<String, Value>,
    pub statements: StatementBuckets,
    pub script_config: ScriptConfig,
    pub style_config: StyleConfig,
    pub css: String,
}

impl GenerationContext {
    /// Seed a context from resolved imports and a copy of the schema's own
    /// state, methods, lifecycles and css.
    pub fn new(schema: &SchemaNode, imports: ResolvedImports, config: &GeneratorConfig) -> Self {
        Self {
            package_imports: imports.package_imports,
            fragment_imports: imports.fragment_imports,
            state: schema.state.clone(),
            methods: schema.methods.clone(),
            life_cycles: schema.life_cycles.clone(),
            statements: StatementBuckets::default(),
            script_config: config.script_config.clone(),
            style_config: config.style_config.clone(),
            css: schema.css.clone(),
        }
    }
}

impl GenerationHooks for GenerationContext {
    fn add_statement(&mut self, statement: Statement) -> bool {
        if statement.value.is_empty() {
            return false;
        }

        let position = statement
            .position
            .unwrap_or(StatementPosition::AfterMethods);
        self.statements.push(position, statement.value);
        true
    }

    fn add_method(&mut self, key: &str, value: Value) -> bool {
        if self.methods.contains_key(key) {
            return false;
        }
        self.methods.insert(key.to_string(), value);
        true
    }

    fn add_state(&mut self, key: &str, value: Value) -> bool {
        if self.state.contains_key(key) {
            return false;
        }
        self.state.insert(key.to_string(), value);
        true
    }

    fn add_import(&mut self, from_path: &str, import: RegistryEntry) -> bool {
        let existing = if self.package_imports.contains(from_path) {
            self.package_imports.get_mut(from_path)
        } else {
            self.fragment_imports.get_mut(from_path)
        };

        match existing {
            Some(imports) => {
                if !import.destructuring && imports.iter().any(|i| !i.destructuring) {
                    return false;
                }
                imports.push(import);
                true
            }
            None => {
                self.package_imports.push(from_path, import);
                true
            }
        }
    }

    fn set_script_config(&mut self, config: &Value) {
        match merge_config(&self.script_config, config) {
            Some(merged) => self.script_config = merged,
            None => tracing::debug!(?config, "ignoring non-object script config patch"),
        }
    }

    fn script_config(&self) -> &ScriptConfig {
        &self.script_config
    }

    fn set_style_config(&mut self, config: &Value) {
        match merge_config(&self.style_config, config) {
            Some(merged) => self.style_config = merged,
            None => tracing::debug!(?config, "ignoring non-object style config patch"),
        }
    }

    fn style_config(&self) -> &StyleConfig {
        &self.style_config
    }

    fn add_css(&mut self, css: &str) {
        if self.css.is_empty() {
            self.css = css.to_string();
        } else {
            self.css.push('\n');
            self.css.push_str(css);
        }
    }
}
