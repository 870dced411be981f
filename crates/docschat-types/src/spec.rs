//! API specification context shared with the LLM.

use serde::{Deserialize, Serialize};

/// A loaded API description, ready to be injected into prompts.
///
/// Built once at startup by the loader in `docschat-infra` and never
/// mutated afterwards. `raw_document` is the pretty-printed JSON of the
/// parsed document with the original key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecContext {
    pub title: String,
    pub version: String,
    pub raw_document: String,
    /// Number of entries under `paths`.
    pub path_count: usize,
    /// Number of HTTP operations across all paths.
    pub operation_count: usize,
}

impl SpecContext {
    /// `"{title} - {version}"`, the form used in the system instruction.
    pub fn display_name(&self) -> String {
        format!("{} - {}", self.title, self.version)
    }
}
