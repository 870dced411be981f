//! OpenAPI/Swagger document loader.
//!
//! Reads a JSON API description from disk and turns it into a
//! [`SpecContext`]. Only the fields needed for prompting are checked; the
//! rest of the schema is passed to the LLM untouched.

use std::path::Path;

use serde_json::{Map, Value};
use tracing::{debug, info};

use docschat_types::error::SpecError;
use docschat_types::spec::SpecContext;

/// Path-item keys that denote an HTTP operation.
const OPERATION_KEYS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// Load and validate the API description at `path`.
pub async fn load_spec(path: &Path) -> Result<SpecContext, SpecError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| SpecError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "read API document");

    let spec = parse_spec(&bytes)?;
    info!(
        title = %spec.title,
        version = %spec.version,
        paths = spec.path_count,
        operations = spec.operation_count,
        "loaded API document"
    );
    Ok(spec)
}

/// Parse an in-memory JSON document.
pub fn parse_spec(bytes: &[u8]) -> Result<SpecContext, SpecError> {
    let document: Value =
        serde_json::from_slice(bytes).map_err(|e| SpecError::Malformed(e.to_string()))?;

    let root = document.as_object().ok_or(SpecError::NotApiDocument)?;
    if !root.contains_key("openapi") && !root.contains_key("swagger") {
        return Err(SpecError::NotApiDocument);
    }

    let info = root.get("info").and_then(Value::as_object);
    let title = info_field(info, "title").ok_or(SpecError::MissingField("info.title"))?;
    let version = info_field(info, "version").ok_or(SpecError::MissingField("info.version"))?;

    let paths = root.get("paths").and_then(Value::as_object);
    let path_count = paths.map_or(0, Map::len);
    let operation_count = paths.map_or(0, count_operations);
    if operation_count == 0 {
        return Err(SpecError::NoOperations);
    }

    let raw_document =
        serde_json::to_string_pretty(&document).map_err(|e| SpecError::Malformed(e.to_string()))?;

    Ok(SpecContext {
        title,
        version,
        raw_document,
        path_count,
        operation_count,
    })
}

fn info_field(info: Option<&Map<String, Value>>, key: &str) -> Option<String> {
    info?.get(key)?.as_str().map(str::to_string)
}

fn count_operations(paths: &Map<String, Value>) -> usize {
    paths
        .values()
        .filter_map(Value::as_object)
        .map(|item| {
            item.keys()
                .filter(|k| OPERATION_KEYS.contains(&k.as_str()))
                .count()
        })
        .sum()
}
