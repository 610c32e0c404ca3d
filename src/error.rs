//! Error types shared by the index builder, renderer and promoter.

use std::path::PathBuf;

/// Result type for gallery operations
pub type GalleryResult<T> = Result<T, GalleryError>;

/// Error types for gallery operations
///
/// Missing descriptions, missing images and unparseable file names are not
/// errors; they show up as absent values in the index and report entries.
#[derive(Debug, thiserror::Error)]
pub enum GalleryError {
    /// Listing, reading, copying or writing a path failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A promotion argument that is neither `all` nor a test index
    #[error("invalid test index '{0}' (expected 'all' or a non-negative integer)")]
    InvalidIndex(String),

    /// JSON output failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GalleryError {
    /// Attach `path` to an I/O error
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GalleryError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Extension for attaching the offending path to `std::io::Result`
pub(crate) trait IoContext<T> {
    fn at(self, path: impl Into<PathBuf>) -> GalleryResult<T>;
}

impl<T> IoContext<T> for std::io::Result<T> {
    fn at(self, path: impl Into<PathBuf>) -> GalleryResult<T> {
        self.map_err(|e| GalleryError::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_names_path() {
        let err = GalleryError::io(
            "recent",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        let msg = err.to_string();
        assert!(msg.contains("recent"), "{}", msg);
        assert!(msg.contains("missing"), "{}", msg);
    }

    #[test]
    fn test_invalid_index_message() {
        let err = GalleryError::InvalidIndex("seven".to_string());
        assert!(err.to_string().contains("'seven'"));
    }
}
