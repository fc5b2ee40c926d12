//! Page plugin: every entry of `pageSchema` becomes `src/views/<fileName>.vue`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::GeneratorConfig;
use crate::error::GenerateError;
use crate::page::{generate_page_code, PageInfo};
use crate::plugin::{Extraction, ExtractionMap, Plugin, PluginContext};
use crate::schema::{AppSchema, OutputFile, SchemaNode};

pub const PAGES_ID: &str = "pages";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PagePluginOptions {
    pub page_base_path: String,
    pub config: GeneratorConfig,
}

impl Default for PagePluginOptions {
    fn default() -> Self {
        Self {
            page_base_path: "./src/views".to_string(),
            config: GeneratorConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PagePlugin {
    options: PagePluginOptions,
}

impl PagePlugin {
    pub fn new(options: PagePluginOptions) -> Self {
        Self { options }
    }
}

/// A page must be an object with a `fileName` or `componentName` to name the file.
fn parse_page(index: usize, value: &Value) -> Result<(SchemaNode, String), GenerateError> {
    let malformed = |reason: String| GenerateError::MalformedPage {
        name: index.to_string(),
        reason,
    };

    if !value.is_object() {
        return Err(malformed("page is not an object".to_string()));
    }

    let page: SchemaNode =
        serde_json::from_value(value.clone()).map_err(|e| malformed(e.to_string()))?;

    let name = page
        .file_name
        .clone()
        .filter(|name| !name.is_empty())
        .or_else(|| Some(page.component_name.clone()).filter(|name| !name.is_empty()))
        .ok_or_else(|| malformed("missing fileName and componentName".to_string()))?;

    Ok((page, name))
}

impl Plugin for PagePlugin {
    fn name(&self) -> &str {
        "plugin-generatecode-page"
    }

    fn description(&self) -> &str {
        "transform page schema to code"
    }

    fn parse_schema(&self, schema: &AppSchema) -> Extraction {
        Extraction {
            id: PAGES_ID.to_string(),
            result: Value::Array(schema.page_schema.clone()),
        }
    }

    fn transform(&self, extracted: &ExtractionMap, ctx: &PluginContext<'_>) -> Vec<OutputFile> {
        let Some(pages) = extracted.get(PAGES_ID).and_then(Value::as_array) else {
            return Vec::new();
        };

        let mut files = Vec::new();
        for (index, value) in pages.iter().enumerate() {
            let (page, name) = match parse_page(index, value) {
                Ok(parsed) => parsed,
                Err(e) => {
                    ctx.log(e.to_log_entry(Some(PAGES_ID)));
                    continue;
                }
            };

            let code = generate_page_code(
                PageInfo {
                    schema: &page,
                    name: &name,
                },
                ctx.registry,
                &self.options.config,
            );

            if code.has_errors() {
                ctx.log_all(code.errors);
                continue;
            }
            ctx.log_all(code.warnings);

            files.push(OutputFile::new(
                &code.panel_name,
                &self.options.page_base_path,
                code.panel_value,
            ));
        }

        files
    }
}
