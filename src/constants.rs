//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! To change where traces are read from or bundles are written to, only edit this file.

use std::path::PathBuf;

/// Trace file, relative to the analysis directory
pub const DEFAULT_TRACE_FILE: &str = "logs/all.stap";

/// Bundle output file, relative to the analysis directory
pub const DEFAULT_OUTPUT_FILE: &str = "stix-file.json";

/// Number of leading characters of a trace line kept as its timestamp
pub const TIMESTAMP_WIDTH: usize = 31;

/// Product reported in the malware-analysis summary object
pub const PRODUCT_NAME: &str = "cuckoo-sandbox";

/// Context of every exported grouping
pub const GROUPING_CONTEXT: &str = "suspicious-activity";

/// STIX spec version stamped on every object
pub const STIX_SPEC_VERSION: &str = "2.1";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "trace-intel";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get config file path from environment, if any
pub fn get_config_path() -> Option<PathBuf> {
    std::env::var("TRACE_INTEL_CONFIG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from)
}

/// Check if reverse DNS for the domains classifier is enabled
pub fn is_dns_enabled() -> bool {
    std::env::var("TRACE_INTEL_NO_DNS")
        .map(|s| s.to_lowercase() == "false" || s == "0")
        .unwrap_or(true)
}
