//! Trace Types
//!
//! Observable records and their dedup key.

use serde::{Deserialize, Serialize};

// ============================================================================
// OBSERVABLE RECORD
// ============================================================================

/// One normalized fact extracted from one trace line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservableRecord {
    /// Absolute path, `host:port`, domain, or flattened command line
    pub name: String,
    /// `<token>|` prefix of the line, empty if absent
    pub container_id: String,
    /// Originating line, provenance only
    pub raw_line: String,
    /// Leading slice of the line, provenance only
    pub timestamp: String,
}

impl ObservableRecord {
    pub fn key(&self) -> ObservableKey {
        ObservableKey {
            name: self.name.clone(),
            container_id: self.container_id.clone(),
        }
    }
}

// ============================================================================
// IDENTITY
// ============================================================================

/// Identity of an observable. Field order gives the output order:
/// by name, then by container id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObservableKey {
    pub name: String,
    pub container_id: String,
}

// ============================================================================
// WORKING DIRECTORY
// ============================================================================

/// Result of working-directory resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingDirectory {
    pub path: String,
    /// Zero-based index of the shell-invocation line it came from
    pub line_index: usize,
}
