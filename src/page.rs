//! Page-level generation entry point used by the page and block plugins.

use serde::{Deserialize, Serialize};

use crate::config::GeneratorConfig;
use crate::error::LogEntry;
use crate::schema::{RegistryEntry, SchemaNode};
use crate::sfc::assemble;

pub const PANEL_TYPE_VUE: &str = "vue";

#[derive(Debug, Clone, Copy)]
pub struct PageInfo<'a> {
    pub schema: &'a SchemaNode,
    pub name: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageCode {
    pub panel_name: String,
    pub panel_value: String,
    pub panel_type: String,
    pub errors: Vec<LogEntry>,
    pub warnings: Vec<LogEntry>,
}

impl PageCode {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Generate the `.vue` document for one page or block. Assembly failures are
/// reported in `errors` with an empty `panel_value`.
pub fn generate_page_code(
    page: PageInfo<'_>,
    registry: &[RegistryEntry],
    config: &GeneratorConfig,
) -> PageCode {
    let panel_name = format!("{}.{}", page.name, PANEL_TYPE_VUE);

    match assemble(page.schema, registry, config) {
        Ok(document) => PageCode {
            panel_name,
            panel_value: document.content,
            panel_type: PANEL_TYPE_VUE.to_string(),
            errors: vec![],
            warnings: document.warnings,
        },
        Err(errors) => PageCode {
            panel_name,
            panel_value: String::new(),
            panel_type: PANEL_TYPE_VUE.to_string(),
            errors: errors
                .iter()
                .map(|e| e.to_log_entry(Some(page.name)))
                .collect(),
            warnings: vec![],
        },
    }
}
