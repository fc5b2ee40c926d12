//! Errors and diagnostics for the generator.
//!
//! Two layers:
//! - [`GenerateError`] is the typed error used inside the crate and at the JSON
//!   boundary.
//! - [`LogEntry`] is the serialisable diagnostic that ends up on the run-scoped
//!   log. Per-document failures never abort a run, they are converted into log
//!   entries by the owning plugin.

#[cfg(feature = "napi")]
use napi_derive::napi;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ═══════════════════════════════════════════════════════════════════════════════
// DIAGNOSTIC CODES
// ═══════════════════════════════════════════════════════════════════════════════

pub const GEN_ERR_BLOCK_MALFORMED: &str = "GEN-ERR-BLOCK-MALFORMED";
pub const GEN_ERR_PAGE_MALFORMED: &str = "GEN-ERR-PAGE-MALFORMED";
pub const GEN_ERR_RENDER: &str = "GEN-ERR-RENDER";
pub const GEN_ERR_INVALID_INPUT: &str = "GEN-ERR-INVALID-INPUT";
pub const GEN_WARN_UNKNOWN_COMPONENT: &str = "GEN-WARN-UNKNOWN-COMPONENT";

fn hint_for(code: &str) -> Option<&'static str> {
    match code {
        GEN_ERR_BLOCK_MALFORMED => {
            Some("Block history content must be a schema object with a componentName.")
        }
        GEN_ERR_PAGE_MALFORMED => {
            Some("Page schema entries must be objects with a fileName or componentName.")
        }
        GEN_ERR_RENDER => Some("Every schema node needs a componentName to be rendered."),
        GEN_WARN_UNKNOWN_COMPONENT => {
            Some("Add the component to componentsMap so an import can be generated.")
        }
        _ => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// ERROR TYPE
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("invalid JSON input: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("block '{id}' is malformed: {reason}")]
    MalformedBlock { id: String, reason: String },

    #[error("page '{name}' is malformed: {reason}")]
    MalformedPage { name: String, reason: String },

    #[error("failed to render '{node}': {reason}")]
    Render { node: String, reason: String },

    #[error("component '{name}' has no componentsMap entry")]
    UnknownComponent { name: String },
}

impl GenerateError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidJson(_) => GEN_ERR_INVALID_INPUT,
            Self::MalformedBlock { .. } => GEN_ERR_BLOCK_MALFORMED,
            Self::MalformedPage { .. } => GEN_ERR_PAGE_MALFORMED,
            Self::Render { .. } => GEN_ERR_RENDER,
            Self::UnknownComponent { .. } => GEN_WARN_UNKNOWN_COMPONENT,
        }
    }

    /// Convert into a log record attributed to `source` (usually a file or schema name).
    pub fn to_log_entry(&self, source: Option<&str>) -> LogEntry {
        LogEntry::new(self.code(), &self.to_string(), source)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// LOG ENTRY
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "napi", napi(object))]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default)]
    pub hints: Vec<String>,
}

impl LogEntry {
    pub fn new(code: &str, message: &str, source: Option<&str>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            source: source.map(str::to_string),
            hints: hint_for(code).map(|h| vec![h.to_string()]).unwrap_or_default(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.code.starts_with("GEN-ERR")
    }
}

impl std::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.source {
            Some(source) => write!(f, "[{}] {} ({})", self.code, self.message, source),
            None => write!(f, "[{}] {}", self.code, self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_entry_carries_code_and_hint() {
        let err = GenerateError::MalformedBlock {
            id: "7".to_string(),
            reason: "content is not an object".to_string(),
        };
        let entry = err.to_log_entry(Some("blocks"));

        assert_eq!(entry.code, GEN_ERR_BLOCK_MALFORMED);
        assert!(entry.is_error());
        assert_eq!(entry.hints.len(), 1);
        assert_eq!(
            entry.to_string(),
            "[GEN-ERR-BLOCK-MALFORMED] block '7' is malformed: content is not an object (blocks)"
        );
    }

    #[test]
    fn test_unknown_component_is_a_warning() {
        let entry = GenerateError::UnknownComponent {
            name: "TinyGrid".to_string(),
        }
        .to_log_entry(None);
        assert!(!entry.is_error());
    }
}
