use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading an API specification file.
///
/// All of these are fatal: the chat session never starts.
#[derive(Debug, Error)]
pub enum SpecError {
    #[error("failed to read OpenAPI file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse OpenAPI spec: {0}")]
    Malformed(String),

    #[error("OpenAPI spec is missing required field '{0}'")]
    MissingField(&'static str),

    #[error("document has neither an 'openapi' nor a 'swagger' version field")]
    NotApiDocument,

    #[error("OpenAPI spec contains no operations")]
    NoOperations,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_error_mentions_path() {
        let err = SpecError::Read {
            path: PathBuf::from("/tmp/missing.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/missing.json"));
        assert!(msg.contains("not found"));
    }

    #[test]
    fn test_missing_field_display() {
        assert_eq!(
            SpecError::MissingField("info.title").to_string(),
            "OpenAPI spec is missing required field 'info.title'"
        );
    }
}
