//! Capture Normalization
//!
//! Pure functions from a raw capture to an observable name.
//! The working directory and the reverse lookup are explicit inputs.

use super::types::{Capture, Normalizer};
use crate::logic::lookup::ReverseLookup;

/// Run-scoped inputs for normalizers
pub struct NormalizeContext<'a> {
    pub working_dir: &'a str,
    pub lookup: &'a dyn ReverseLookup,
}

impl Normalizer {
    /// Normalize one capture. An empty result means "no observable".
    pub fn apply(&self, capture: &Capture, ctx: &NormalizeContext<'_>) -> String {
        match self {
            Normalizer::RelativePath => resolve_path(capture.first(), ctx.working_dir),
            Normalizer::HostPort => host_port(capture),
            Normalizer::CommandLine => flatten_command_line(capture.first()),
            Normalizer::ReverseLookup => resolve_domain(capture.first(), ctx.lookup),
        }
    }
}

/// Absolute paths pass through, relative ones are joined to `working_dir`
pub fn resolve_path(path: &str, working_dir: &str) -> String {
    if path.is_empty() || path.starts_with('/') {
        path.to_string()
    } else {
        format!("{}/{}", working_dir, path)
    }
}

/// `(address, port)` -> `address:port`; anything else yields nothing
pub fn host_port(capture: &Capture) -> String {
    match capture {
        Capture::Tuple(values) if values.len() >= 2 => {
            if values[0].is_empty() {
                String::new()
            } else {
                format!("{}:{}", values[0], values[1])
            }
        }
        _ => String::new(),
    }
}

/// `"/bin/sh", "-c", "x"` -> `/bin/sh -c x`
pub fn flatten_command_line(args: &str) -> String {
    args.replace(['"', ','], "")
}

/// Domain for `address`, or `address` itself when unresolvable
pub fn resolve_domain(address: &str, lookup: &dyn ReverseLookup) -> String {
    if address.is_empty() {
        return String::new();
    }
    lookup
        .lookup(address)
        .unwrap_or_else(|| address.to_string())
}
