//! # Plugin Host
//!
//! Runs an ordered list of plugins over one application schema.
//!
//! 1. **Extraction**: every plugin's `parse_schema` runs first; results are
//!    stored by id in a shared [`ExtractionMap`] (a later id overwrites an
//!    earlier one).
//! 2. **Transform**: every plugin's `transform` then sees the whole map plus a
//!    [`PluginContext`] holding the registry and the run-scoped log.
//!
//! A failing item is dropped and logged; the run itself never fails.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use crate::error::LogEntry;
use crate::schema::{AppSchema, OutputFile, RegistryEntry};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extraction {
    pub id: String,
    pub result: Value,
}

pub type ExtractionMap = BTreeMap<String, Value>;

/// Shared, read-only registry plus the append-only log for one run.
pub struct PluginContext<'a> {
    pub registry: &'a [RegistryEntry],
    logs: &'a Mutex<Vec<LogEntry>>,
}

impl<'a> PluginContext<'a> {
    pub fn new(registry: &'a [RegistryEntry], logs: &'a Mutex<Vec<LogEntry>>) -> Self {
        Self { registry, logs }
    }

    /// Safe to call from parallel workers.
    pub fn log(&self, entry: LogEntry) {
        tracing::warn!(code = %entry.code, "{}", entry.message);
        self.logs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
    }

    pub fn log_all(&self, entries: impl IntoIterator<Item = LogEntry>) {
        for entry in entries {
            self.log(entry);
        }
    }
}

pub trait Plugin: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    /// Extract this plugin's slice of the schema. Defaults to nothing.
    fn parse_schema(&self, _schema: &AppSchema) -> Extraction {
        Extraction {
            id: self.name().to_string(),
            result: Value::Null,
        }
    }

    /// Produce output files. Defaults to none.
    fn transform(&self, _extracted: &ExtractionMap, _ctx: &PluginContext<'_>) -> Vec<OutputFile> {
        Vec::new()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOutput {
    pub files: Vec<OutputFile>,
    pub logs: Vec<LogEntry>,
}

#[tracing::instrument(skip_all, fields(plugins = plugins.len()))]
pub fn run(
    schema: &AppSchema,
    registry: &[RegistryEntry],
    plugins: &[Box<dyn Plugin>],
) -> GenerationOutput {
    let mut extracted = ExtractionMap::new();
    for plugin in plugins {
        let Extraction { id, result } = plugin.parse_schema(schema);
        if extracted.insert(id.clone(), result).is_some() {
            tracing::warn!(plugin = plugin.name(), id = %id, "extraction id overwritten");
        }
    }

    let logs = Mutex::new(Vec::new());
    let ctx = PluginContext::new(registry, &logs);

    let mut files = Vec::new();
    for plugin in plugins {
        let produced = plugin.transform(&extracted, &ctx);
        tracing::debug!(plugin = plugin.name(), files = produced.len(), "plugin finished");
        files.extend(produced);
    }

    let logs = logs.into_inner().unwrap_or_else(PoisonError::into_inner);
    tracing::info!(files = files.len(), logs = logs.len(), "generation finished");

    GenerationOutput { files, logs }
}
