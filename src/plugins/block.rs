//! Block plugin: every stored block snapshot becomes `src/components/<Name>.vue`.
//!
//! Blocks are assembled in parallel; each assembly owns its context. Files and
//! log entries are gathered per block and emitted in input order.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::GeneratorConfig;
use crate::error::LogEntry;
use crate::page::{generate_page_code, PageInfo};
use crate::plugin::{Extraction, ExtractionMap, Plugin, PluginContext};
use crate::schema::{AppSchema, OutputFile, RegistryEntry, SchemaNode};

pub const BLOCKS_ID: &str = "blocks";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlockPluginOptions {
    pub block_base_path: String,
    pub config: GeneratorConfig,
}

impl Default for BlockPluginOptions {
    fn default() -> Self {
        Self {
            block_base_path: "./src/components".to_string(),
            // blocks import each other from the same directory
            config: GeneratorConfig {
                fragment_base_path: ".".to_string(),
                ..Default::default()
            },
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BlockPlugin {
    options: BlockPluginOptions,
}

impl BlockPlugin {
    pub fn new(options: BlockPluginOptions) -> Self {
        Self { options }
    }

    /// Assemble one extracted `{ id, content }` entry. The entry's position is
    /// used as its id when none was stored.
    fn generate(
        &self,
        index: usize,
        entry: &Value,
        registry: &[RegistryEntry],
    ) -> (Option<OutputFile>, Vec<LogEntry>) {
        let id = match entry.get("id") {
            Some(Value::String(id)) if !id.is_empty() => id.clone(),
            _ => index.to_string(),
        };
        let content = entry.get("content").unwrap_or(&Value::Null);

        let block = match SchemaNode::from_block_content(&id, content) {
            Ok(block) => block,
            Err(e) => return (None, vec![e.to_log_entry(Some(BLOCKS_ID))]),
        };

        let page = generate_page_code(
            PageInfo {
                schema: &block,
                name: &block.component_name,
            },
            registry,
            &self.options.config,
        );

        if page.has_errors() {
            return (None, page.errors);
        }

        let file = OutputFile::new(
            &page.panel_name,
            &self.options.block_base_path,
            page.panel_value,
        );
        (Some(file), page.warnings)
    }
}

impl Plugin for BlockPlugin {
    fn name(&self) -> &str {
        "plugin-generatecode-block"
    }

    fn description(&self) -> &str {
        "transform block schema to code"
    }

    fn parse_schema(&self, schema: &AppSchema) -> Extraction {
        let blocks = schema
            .block_histories
            .iter()
            .filter(|history| history.content.is_object())
            .map(|history| json!({ "id": history.id, "content": history.content }))
            .collect();

        Extraction {
            id: BLOCKS_ID.to_string(),
            result: Value::Array(blocks),
        }
    }

    fn transform(&self, extracted: &ExtractionMap, ctx: &PluginContext<'_>) -> Vec<OutputFile> {
        let Some(blocks) = extracted.get(BLOCKS_ID).and_then(Value::as_array) else {
            return Vec::new();
        };

        let results: Vec<(Option<OutputFile>, Vec<LogEntry>)> = blocks
            .par_iter()
            .enumerate()
            .map(|(index, entry)| self.generate(index, entry, ctx.registry))
            .collect();

        let mut files = Vec::with_capacity(results.len());
        for (file, logs) in results {
            ctx.log_all(logs);
            files.extend(file);
        }
        files
    }
}
