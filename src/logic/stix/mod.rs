//! STIX Module
//!
//! Converts scan output into a STIX 2.1 bundle.
//!
//! ## Structure
//! - `types`: observable objects, grouping, malware-analysis, bundle
//! - `export`: category -> object mapping and bundle assembly

pub mod types;
pub mod export;

#[cfg(test)]
mod tests;

pub use types::{
    AddressObject, Bundle, DomainObject, FileObject, Grouping, MalwareAnalysis, ProcessObject,
    Provenance, StixObject,
};
pub use export::{dedup_by_command_line, executable_path, is_ipv4_host, ExportAdapter};
