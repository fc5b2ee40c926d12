//! Schema data model
//!
//! The tree-shaped component description consumed by the generator, the
//! component registry (`componentsMap`) and the top-level application schema.
//! Field names follow the camelCase JSON produced by the editor.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::GenerateError;

/// `componentType` marking a node as a reference to a separately stored block.
pub const BLOCK_COMPONENT_TYPE: &str = "Block";

pub const JS_EXPRESSION: &str = "JSExpression";
pub const JS_FUNCTION: &str = "JSFunction";

// ═══════════════════════════════════════════════════════════════════════════════
// SCHEMA NODE
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaNode {
    #[serde(default)]
    pub component_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default)]
    pub props: Map<String, Value>,
    #[serde(default)]
    pub children: Vec<SchemaNode>,
    #[serde(default)]
    pub state: Map<String, Value>,
    #[serde(default)]
    pub methods: Map<String, Value>,
    #[serde(default)]
    pub life_cycles: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_source: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bridge: Option<Bridge>,
    #[serde(default)]
    pub css: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Value>,
    #[serde(default, rename = "loop", skip_serializing_if = "Option::is_none")]
    pub loop_source: Option<Value>,
    #[serde(default)]
    pub loop_args: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bridge {
    #[serde(default)]
    pub imports: Vec<Value>,
}

impl SchemaNode {
    pub fn is_block(&self) -> bool {
        self.component_type.as_deref() == Some(BLOCK_COMPONENT_TYPE)
    }

    /// Parse a stored block snapshot. Anything that is not an object carrying a
    /// `componentName` is rejected.
    pub fn from_block_content(id: &str, content: &Value) -> Result<Self, GenerateError> {
        if !content.is_object() {
            return Err(GenerateError::MalformedBlock {
                id: id.to_string(),
                reason: "content is not an object".to_string(),
            });
        }

        let node: SchemaNode =
            serde_json::from_value(content.clone()).map_err(|e| GenerateError::MalformedBlock {
                id: id.to_string(),
                reason: e.to_string(),
            })?;

        if node.component_name.is_empty() {
            return Err(GenerateError::MalformedBlock {
                id: id.to_string(),
                reason: "missing componentName".to_string(),
            });
        }

        Ok(node)
    }
}

/// Ids arrive as strings or numbers depending on which editor produced them.
fn lenient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

// ═══════════════════════════════════════════════════════════════════════════════
// PROP VALUES
// ═══════════════════════════════════════════════════════════════════════════════

/// Classified view over a raw prop / state / method value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue<'a> {
    /// `{ "type": "JSExpression", "value": "this.state.x" }`
    Expression(&'a str),
    /// `{ "type": "JSFunction", "value": "function f() {}" }`
    Function(&'a str),
    Literal(&'a Value),
}

impl<'a> PropValue<'a> {
    pub fn classify(value: &'a Value) -> Self {
        let code = value.get("value").and_then(Value::as_str);
        match (value.get("type").and_then(Value::as_str), code) {
            (Some(JS_EXPRESSION), Some(code)) => PropValue::Expression(code),
            (Some(JS_FUNCTION), Some(code)) => PropValue::Function(code),
            _ => PropValue::Literal(value),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// REGISTRY
// ═══════════════════════════════════════════════════════════════════════════════

/// One `componentsMap` entry. Also used as the import descriptor stored in the
/// generation context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryEntry {
    pub component_name: String,
    #[serde(default)]
    pub package: String,
    #[serde(default)]
    pub export_name: Option<String>,
    #[serde(default)]
    pub destructuring: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl RegistryEntry {
    /// Named import of `export_name` from `package`.
    pub fn named(component_name: &str, package: &str, export_name: &str) -> Self {
        Self {
            component_name: component_name.to_string(),
            package: package.to_string(),
            export_name: Some(export_name.to_string()),
            destructuring: true,
            version: None,
        }
    }

    /// Default import bound to `component_name`.
    pub fn default_import(component_name: &str, package: &str) -> Self {
        Self {
            component_name: component_name.to_string(),
            package: package.to_string(),
            export_name: Some(component_name.to_string()),
            destructuring: false,
            version: None,
        }
    }

    pub fn export_name(&self) -> &str {
        self.export_name.as_deref().unwrap_or(&self.component_name)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// APPLICATION SCHEMA
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSchema {
    #[serde(default)]
    pub components_map: Vec<RegistryEntry>,
    /// Kept raw so one malformed page does not reject the whole schema.
    #[serde(default)]
    pub page_schema: Vec<Value>,
    #[serde(default)]
    pub block_histories: Vec<BlockHistory>,
    #[serde(default)]
    pub meta: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockHistory {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(default)]
    pub content: Value,
}

// ═══════════════════════════════════════════════════════════════════════════════
// OUTPUT
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputFile {
    pub file_name: String,
    #[serde(alias = "paths")]
    pub path: String,
    pub file_content: String,
}

impl OutputFile {
    pub fn new(file_name: &str, path: &str, file_content: String) -> Self {
        Self {
            file_name: file_name.to_string(),
            path: path.to_string(),
            file_content,
        }
    }
}
