//! Export Adapter
//!
//! Maps the final per-category observables onto STIX objects: one grouping
//! per non-empty category and one malware-analysis summary over everything.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use super::types::{
    new_id, stix_timestamp, AddressObject, Bundle, DomainObject, FileObject, Grouping,
    MalwareAnalysis, ProcessObject, StixObject,
};
use crate::constants::{GROUPING_CONTEXT, PRODUCT_NAME, STIX_SPEC_VERSION};
use crate::logic::catalog::rules::{EXECUTABLE_PATH_PATTERN, IPV4_HOST_PATTERN};
use crate::logic::catalog::Category;
use crate::logic::trace::{ObservableRecord, Observables};

static EXECUTABLE_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(EXECUTABLE_PATH_PATTERN).expect("executable path pattern is valid"));

static IPV4_HOST: Lazy<Regex> =
    Lazy::new(|| Regex::new(IPV4_HOST_PATTERN).expect("ipv4 host pattern is valid"));

// ============================================================================
// HELPERS
// ============================================================================

/// First quoted argument of the execve call in `raw_line`, empty if none
pub fn executable_path(raw_line: &str) -> String {
    EXECUTABLE_PATH
        .captures(raw_line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Is the host part of `host:port` a dotted-decimal IPv4 address?
pub fn is_ipv4_host(name: &str) -> bool {
    let host = name.rsplit_once(':').map(|(host, _)| host).unwrap_or(name);
    IPV4_HOST.is_match(host)
}

/// Process-export identity: command line only, container ignored.
/// Keeps the first record per command line, in input order.
pub fn dedup_by_command_line(records: &[ObservableRecord]) -> Vec<&ObservableRecord> {
    let mut seen = HashSet::new();
    let mut kept = Vec::new();
    for record in records {
        if seen.insert(record.name.as_str()) {
            kept.push(record);
        }
    }
    kept
}

// ============================================================================
// ADAPTER
// ============================================================================

pub struct ExportAdapter {
    created: DateTime<Utc>,
}

impl Default for ExportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ExportAdapter {
    pub fn new() -> Self {
        Self { created: Utc::now() }
    }

    /// Fixed creation time for the domain objects
    pub fn at(created: DateTime<Utc>) -> Self {
        Self { created }
    }

    /// Observables of one category as STIX objects
    pub fn convert(&self, category: Category, records: &[ObservableRecord]) -> Vec<StixObject> {
        match category {
            Category::FilesRemoved | Category::FilesRead | Category::FilesWritten => records
                .iter()
                .map(|r| StixObject::File(FileObject::new(r)))
                .collect(),
            Category::HostsConnected => records
                .iter()
                .map(|r| {
                    if is_ipv4_host(&r.name) {
                        StixObject::Ipv4Addr(AddressObject::new("ipv4-addr", r))
                    } else {
                        StixObject::Ipv6Addr(AddressObject::new("ipv6-addr", r))
                    }
                })
                .collect(),
            Category::ProcessesCreated => dedup_by_command_line(records)
                .into_iter()
                .map(|r| StixObject::Process(ProcessObject::new(r, executable_path(&r.raw_line))))
                .collect(),
            Category::Domains => records
                .iter()
                .map(|r| StixObject::DomainName(DomainObject::new(r)))
                .collect(),
        }
    }

    /// Bundle layout: observables, summary, groupings
    pub fn export(&self, observables: &Observables) -> Bundle {
        let timestamp = stix_timestamp(self.created);
        let mut all_objects: Vec<StixObject> = Vec::new();
        let mut groupings: Vec<StixObject> = Vec::new();

        for (category, records) in observables.non_empty() {
            let objects = self.convert(category, records);
            log::debug!("Exporting {} {} objects", objects.len(), category);

            groupings.push(StixObject::Grouping(Grouping {
                id: new_id("grouping"),
                spec_version: STIX_SPEC_VERSION.to_string(),
                created: timestamp.clone(),
                modified: timestamp.clone(),
                name: category.as_str().to_string(),
                context: GROUPING_CONTEXT.to_string(),
                object_refs: objects.iter().map(|o| o.id().to_string()).collect(),
            }));
            all_objects.extend(objects);
        }

        let summary = MalwareAnalysis {
            id: new_id("malware-analysis"),
            spec_version: STIX_SPEC_VERSION.to_string(),
            created: timestamp.clone(),
            modified: timestamp,
            product: PRODUCT_NAME.to_string(),
            analysis_sco_refs: all_objects.iter().map(|o| o.id().to_string()).collect(),
        };

        all_objects.push(StixObject::MalwareAnalysis(summary));
        all_objects.extend(groupings);

        let bundle = Bundle::new(all_objects);
        log::info!("Bundle {} with {} objects", bundle.id, bundle.objects.len());
        bundle
    }
}
