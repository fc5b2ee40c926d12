//! Template plugin: emits the project scaffold stamped from the app metadata.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::plugin::{Extraction, ExtractionMap, Plugin, PluginContext};
use crate::scaffold::generate_template;
use crate::schema::{AppSchema, OutputFile};

pub const TEMPLATE_ID: &str = "template";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplatePluginOptions {
    /// Merged over the extracted context; its keys win.
    pub context: Value,
}

#[derive(Debug, Clone, Default)]
pub struct TemplatePlugin {
    options: TemplatePluginOptions,
}

impl TemplatePlugin {
    pub fn new(options: TemplatePluginOptions) -> Self {
        Self { options }
    }

    fn context(&self, extracted: &ExtractionMap) -> Value {
        let mut context = match extracted.get(TEMPLATE_ID) {
            Some(Value::Object(map)) => map.clone(),
            _ => Default::default(),
        };
        if let Value::Object(overrides) = &self.options.context {
            for (key, value) in overrides {
                context.insert(key.clone(), value.clone());
            }
        }
        Value::Object(context)
    }
}

impl Plugin for TemplatePlugin {
    fn name(&self) -> &str {
        "plugin-generatecode-template"
    }

    fn description(&self) -> &str {
        "generate the application scaffold"
    }

    fn parse_schema(&self, schema: &AppSchema) -> Extraction {
        Extraction {
            id: TEMPLATE_ID.to_string(),
            result: json!({ "meta": schema.meta }),
        }
    }

    fn transform(&self, extracted: &ExtractionMap, ctx: &PluginContext<'_>) -> Vec<OutputFile> {
        generate_template(&self.context(extracted), ctx.registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LogEntry;
    use std::sync::Mutex;

    fn readme(files: &[OutputFile]) -> &str {
        &files
            .iter()
            .find(|f| f.file_name == "README.md")
            .unwrap()
            .file_content
    }

    #[test]
    fn test_meta_flows_into_scaffold() {
        let schema: AppSchema =
            serde_json::from_value(json!({ "meta": { "name": "crm", "description": "CRM" } }))
                .unwrap();
        let plugin = TemplatePlugin::default();
        let mut extracted = ExtractionMap::new();
        let Extraction { id, result } = plugin.parse_schema(&schema);
        extracted.insert(id, result);

        let logs: Mutex<Vec<LogEntry>> = Mutex::new(Vec::new());
        let files = plugin.transform(&extracted, &PluginContext::new(&[], &logs));

        assert_eq!(files.len(), 13);
        assert!(readme(&files).starts_with("## crm\n\nCRM\n"));
        assert!(logs.into_inner().unwrap().is_empty());
    }

    #[test]
    fn test_option_context_overrides_extraction() {
        let plugin = TemplatePlugin::new(TemplatePluginOptions {
            context: json!({ "meta": { "name": "override" } }),
        });
        let mut extracted = ExtractionMap::new();
        extracted.insert(TEMPLATE_ID.to_string(), json!({ "meta": { "name": "crm" } }));

        let logs: Mutex<Vec<LogEntry>> = Mutex::new(Vec::new());
        let files = plugin.transform(&extracted, &PluginContext::new(&[], &logs));
        assert!(readme(&files).starts_with("## override\n"));
    }

    #[test]
    fn test_missing_extraction_uses_defaults() {
        let logs: Mutex<Vec<LogEntry>> = Mutex::new(Vec::new());
        let files =
            TemplatePlugin::default().transform(&ExtractionMap::new(), &PluginContext::new(&[], &logs));
        let manifest = files.iter().find(|f| f.file_name == "package.json").unwrap();
        assert!(manifest.file_content.contains("\"name\": \"lowcode-app\""));
    }
}
