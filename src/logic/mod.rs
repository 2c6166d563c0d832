//! Logic Module - Trace Extraction & Export
//!
//! ## Pipeline
//! - `catalog/` - classifier table, patterns, normalizers
//! - `trace/` - working directory, line scan, dedup/ordering
//! - `stix/` - STIX object model and export adapter
//! - `lookup` - injectable reverse DNS
//! - `config` - per-run configuration
//! - `report` - analysis directory in, bundle file out

pub mod catalog;
pub mod trace;
pub mod stix;
pub mod lookup;
pub mod config;
pub mod report;
