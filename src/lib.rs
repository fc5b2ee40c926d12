//! # Low-Code Schema Code Generator
//!
//! Turns a low-code application schema (pages, block snapshots, a component
//! registry and app metadata) into the source files of a Vue project.
//!
//! ## Pipeline
//!
//! 1. **Placeholder substitution** (`placeholder`): `MARK{a.b}END` markers in
//!    scaffold templates are replaced by values looked up in a context.
//! 2. **Import resolution** (`imports`): component names referenced anywhere
//!    in a schema tree are grouped by package, block references become
//!    relative file imports.
//! 3. **Assembly** (`sfc`): one schema becomes one `.vue` document. Renderers
//!    contribute through the [`GenerationHooks`] API on a per-call context.
//! 4. **Plugin host** (`plugin`): an ordered plugin list extracts from the
//!    app schema, then transforms the extractions into output files.
//!
//! ## Invariants
//!
//! - Every assembly owns its context; no state is shared between documents.
//! - The caller's schema and config are never mutated.
//! - One bad page or block is dropped and logged; the run still succeeds.

#[cfg(feature = "napi")]
use napi_derive::napi;

use serde::{Deserialize, Serialize};

pub mod config;
pub mod context;
pub mod error;
pub mod imports;
pub mod manifest;
pub mod page;
pub mod placeholder;
pub mod plugin;
pub mod plugins;
pub mod scaffold;
pub mod schema;
pub mod script;
pub mod sfc;
pub mod style;
pub mod template;

#[cfg(test)]
mod placeholder_tests;
#[cfg(test)]
mod sfc_tests;

pub use config::{merge_config, GeneratorConfig, ScriptConfig, StyleConfig};
pub use context::{GenerationContext, GenerationHooks, Statement, StatementPosition};
pub use error::{GenerateError, LogEntry};
pub use imports::{render_import_statements, resolve_imports, ImportMap, ImportPaths};
pub use page::{generate_page_code, PageCode, PageInfo};
pub use placeholder::substitute;
pub use plugin::{run, Extraction, ExtractionMap, GenerationOutput, Plugin, PluginContext};
pub use plugins::{
    BlockPlugin, BlockPluginOptions, PagePlugin, PagePluginOptions, TemplatePlugin,
    TemplatePluginOptions,
};
pub use scaffold::generate_template;
pub use schema::{AppSchema, OutputFile, RegistryEntry, SchemaNode};
pub use sfc::{assemble, assemble_with, AssembledDocument};

/// Options for the default plugin list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppOptions {
    pub template: TemplatePluginOptions,
    pub block: BlockPluginOptions,
    pub page: PagePluginOptions,
}

/// The plugins [`generate_app`] runs: scaffold, blocks, pages.
pub fn default_plugins(options: AppOptions) -> Vec<Box<dyn Plugin>> {
    vec![
        Box::new(TemplatePlugin::new(options.template)),
        Box::new(BlockPlugin::new(options.block)),
        Box::new(PagePlugin::new(options.page)),
    ]
}

/// Generate the whole project. The registry is the schema's `componentsMap`.
pub fn generate_app(schema: &AppSchema, options: AppOptions) -> GenerationOutput {
    run(schema, &schema.components_map, &default_plugins(options))
}

/// JSON in, JSON out. Only unparseable input is an error; per-item failures
/// are reported in the output's `logs`.
pub fn generate_app_json(schema: &str, options: Option<&str>) -> Result<String, GenerateError> {
    let schema: AppSchema = serde_json::from_str(schema)?;
    let options: AppOptions = match options {
        Some(text) if !text.trim().is_empty() => serde_json::from_str(text)?,
        _ => AppOptions::default(),
    };

    let output = generate_app(&schema, options);
    Ok(serde_json::to_string(&output)?)
}

// ═══════════════════════════════════════════════════════════════════════════════
// NAPI EXPORTS
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(feature = "napi")]
#[napi]
pub fn generate_app_native(
    schema: serde_json::Value,
    options: Option<serde_json::Value>,
) -> napi::Result<serde_json::Value> {
    let schema: AppSchema =
        serde_json::from_value(schema).map_err(|e| napi::Error::from_reason(e.to_string()))?;
    let options: AppOptions = options
        .map(serde_json::from_value)
        .transpose()
        .map_err(|e| napi::Error::from_reason(e.to_string()))?
        .unwrap_or_default();

    serde_json::to_value(generate_app(&schema, options))
        .map_err(|e| napi::Error::from_reason(e.to_string()))
}

#[cfg(feature = "napi")]
#[napi]
pub fn substitute_native(context: serde_json::Value, template: String) -> String {
    substitute(&context, &template)
}
