//! Catalog Types
//!
//! Core types for the classifier table.
//! No matching logic here - only data structures.

use serde::{Deserialize, Serialize};

// ============================================================================
// CATEGORY
// ============================================================================

/// Observable category, one per classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// unlink / unlinkat / rmdir targets
    FilesRemoved,
    /// openat with a read flag
    FilesRead,
    /// openat with a write flag, rename/link targets, mkdir
    FilesWritten,
    /// connect endpoints as `address:port`
    HostsConnected,
    /// execve argument lists
    ProcessesCreated,
    /// connect addresses, reverse resolved when possible
    Domains,
}

impl Category {
    /// Export order
    pub const ALL: [Category; 6] = [
        Category::FilesRemoved,
        Category::FilesRead,
        Category::FilesWritten,
        Category::HostsConnected,
        Category::ProcessesCreated,
        Category::Domains,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::FilesRemoved => "files_removed",
            Category::FilesRead => "files_read",
            Category::FilesWritten => "files_written",
            Category::HostsConnected => "hosts_connected",
            Category::ProcessesCreated => "processes_created",
            Category::Domains => "domains",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// CAPTURE
// ============================================================================

/// One pattern match: a single group, or a fixed-arity tuple when the
/// pattern has more than one capture group
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capture {
    Single(String),
    Tuple(Vec<String>),
}

impl Capture {
    /// The whole capture for `Single`, the first element for `Tuple`
    pub fn first(&self) -> &str {
        match self {
            Capture::Single(value) => value,
            Capture::Tuple(values) => values.first().map(String::as_str).unwrap_or(""),
        }
    }
}

// ============================================================================
// CLASSIFIER DEFINITION
// ============================================================================

/// How a raw capture becomes an observable name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalizer {
    /// Absolute paths unchanged, relative paths joined to the working directory
    RelativePath,
    /// `(address, port)` -> `address:port`
    HostPort,
    /// Argument-list literal flattened into a command line
    CommandLine,
    /// Address replaced by its reverse-resolved domain, if any
    ReverseLookup,
}

/// Declarative classifier entry. Immutable; compiled into a
/// [`super::Classifier`] once per catalog.
#[derive(Debug, Clone)]
pub struct ClassifierDef {
    pub category: Category,
    /// A line must contain one of these to be considered at all
    pub keywords: &'static [&'static str],
    /// Applied in order, every match of every pattern counts
    pub patterns: &'static [&'static str],
    pub normalizer: Normalizer,
}
