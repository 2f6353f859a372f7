//! Errors raised at the outer surfaces of the crate: reading files and
//! decoding saved gist payloads.
//!
//! The preview core itself is total. Classification never fails, renderers
//! degrade to escaped output, and transform failures are values
//! ([`TranspileError`](crate::preview::transpiler::TranspileError)) rendered
//! as an error document.

use std::path::PathBuf;

/// Errors from loading bundles and files.
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    /// A file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The gist payload was not valid JSON or lacked the `files` table.
    #[error("invalid gist payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// A file entry in the payload carried no `content`.
    #[error("gist file {filename} has no content (truncated or not fetched)")]
    MissingContent { filename: String },

    /// The requested file is not part of the bundle.
    #[error("no file named {0} in bundle")]
    FileNotFound(String),

    /// The bundle contains no file that can be previewed.
    #[error("bundle has no previewable file")]
    NothingToPreview,
}

impl PreviewError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = PreviewError::FileNotFound("index.html".to_string());
        assert_eq!(err.to_string(), "no file named index.html in bundle");

        let err = PreviewError::io(
            "gist.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.to_string(), "failed to read gist.json: gone");
    }

    #[test]
    fn test_payload_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: PreviewError = json_err.into();
        assert!(matches!(err, PreviewError::Payload(_)));
    }
}
