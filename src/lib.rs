//! trace-intel - sandbox syscall trace to STIX 2.1 observables

pub mod constants;
pub mod error;
pub mod logic;

pub use error::{TraceError, TraceResult};
pub use logic::config::ScanConfig;
pub use logic::report::{process_trace, run, ReportSummary};
