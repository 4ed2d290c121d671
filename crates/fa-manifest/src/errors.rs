use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Conditions that stop a marketplace scan outright.
///
/// Per-plugin schema problems are not errors of this type; they are
/// accumulated as messages in a [`crate::ValidationResult`].
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("{} not found!", .0.display())]
    MarketplaceNotFound(PathBuf),

    #[error("Error reading file: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid JSON: {source}")]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Expected a JSON object")]
    NotAnObject(PathBuf),

    #[error("plugins directory not found: {}", .0.display())]
    PluginsDirNotFound(PathBuf),

    #[error("Failed to read plugins directory: {0}")]
    Walk(#[from] walkdir::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_json_display_carries_parser_message() {
        let source = serde_json::from_str::<serde_json::Value>("{").expect_err("truncated json");
        let err = ManifestError::InvalidJson {
            path: PathBuf::from("plugin.json"),
            source,
        };
        assert!(err.to_string().starts_with("Invalid JSON: EOF while parsing"));
    }
}
