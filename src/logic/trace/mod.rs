//! Trace Module
//!
//! Turns a raw syscall trace into per-category observable records.
//!
//! ## Structure
//! - `types`: ObservableRecord, ObservableKey, WorkingDirectory
//! - `filter`: keyword line filter and whitelist
//! - `cwd`: working-directory resolution
//! - `accumulator`: keyed dedup, first insertion wins
//! - `scanner`: the per-line pipeline
//!
//! ## Usage
//! ```ignore
//! let catalog = PatternCatalog::standard()?;
//! let observables = scan_trace(&text, &catalog, &ScanConfig::offline(), &NoReverseLookup)?;
//! for (category, records) in observables.non_empty() {
//!     println!("{}: {}", category, records.len());
//! }
//! ```

pub mod types;
pub mod filter;
pub mod cwd;
pub mod accumulator;
pub mod scanner;


pub use types::{ObservableKey, ObservableRecord, WorkingDirectory};
pub use filter::{LineFilter, Whitelist};
pub use cwd::resolve_working_dir;
pub use accumulator::ObservableSet;
pub use scanner::{scan_trace, Observables, ScanStats, TraceScanner};
