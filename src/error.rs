//! Error handling

use std::path::PathBuf;

pub type TraceResult<T> = Result<T, TraceError>;

#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    /// No `sh -c <script>` invocation anywhere in the trace
    #[error("no shell invocation found in trace, working directory cannot be resolved")]
    WorkingDirectoryUnresolved,

    /// A classifier pattern failed to compile
    #[error("invalid pattern for {category}: {source}")]
    InvalidPattern {
        category: String,
        #[source]
        source: regex::Error,
    },

    // Storage errors
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Config(String),
}

impl TraceError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TraceError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_mentions_path() {
        let err = TraceError::io(
            "/tmp/analysis/logs/all.stap",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/tmp/analysis/logs/all.stap"));
        assert!(msg.contains("missing"));
    }

    #[test]
    fn test_regex_error_is_source() {
        use std::error::Error;

        let source = regex::Regex::new("(").unwrap_err();
        let err = TraceError::InvalidPattern {
            category: "files_read".to_string(),
            source,
        };
        assert!(err.to_string().starts_with("invalid pattern for files_read"));
        assert!(err.source().is_some());
    }
}
