//! Scan Configuration
//!
//! Data tables and switches for one run.
//! Can be loaded from a JSON config file or built in code.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{TraceError, TraceResult};
use crate::logic::catalog::DEFAULT_WHITELIST;

// ============================================================================
// SCAN CONFIG
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Observable names starting with any of these are dropped
    pub whitelist: Vec<String>,
    /// Leading characters of a line kept as its timestamp
    pub timestamp_width: usize,
    /// Reverse resolve connect addresses for the domains category
    pub resolve_domains: bool,
    /// Memoize reverse lookups for the duration of the run
    pub cache_lookups: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            whitelist: DEFAULT_WHITELIST.iter().map(|s| s.to_string()).collect(),
            timestamp_width: constants::TIMESTAMP_WIDTH,
            resolve_domains: true,
            cache_lookups: true,
        }
    }
}

impl ScanConfig {
    /// No network access at all, addresses are exported as-is
    pub fn offline() -> Self {
        Self {
            resolve_domains: false,
            ..Default::default()
        }
    }

    /// Nothing is suppressed
    pub fn without_whitelist() -> Self {
        Self {
            whitelist: Vec::new(),
            ..Default::default()
        }
    }

    /// Load from a JSON file; absent fields keep their defaults
    pub fn load(path: &Path) -> TraceResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| TraceError::io(path, e))?;
        let config: ScanConfig = serde_json::from_str(&raw)
            .map_err(|e| TraceError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Config file from `TRACE_INTEL_CONFIG` if set, then env switches
    pub fn from_env() -> TraceResult<Self> {
        let mut config = match constants::get_config_path() {
            Some(path) => Self::load(&path)?,
            None => Self::default(),
        };
        if !constants::is_dns_enabled() {
            config.resolve_domains = false;
        }
        Ok(config)
    }

    pub fn validate(&self) -> TraceResult<()> {
        if self.timestamp_width == 0 {
            return Err(TraceError::Config("timestamp_width must be > 0".to_string()));
        }
        if self.whitelist.iter().any(|p| p.is_empty()) {
            // An empty prefix would suppress every observable
            return Err(TraceError::Config("whitelist entries must not be empty".to_string()));
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
