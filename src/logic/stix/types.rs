//! STIX 2.1 Types
//!
//! Logical STIX objects produced by the export adapter.
//! Serde derives give the JSON shape; no export logic here.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::STIX_SPEC_VERSION;
use crate::logic::trace::ObservableRecord;

/// `<type>--<uuid>`
pub fn new_id(object_type: &str) -> String {
    format!("{}--{}", object_type, Uuid::new_v4())
}

/// STIX timestamp, millisecond precision, `Z` suffix
pub fn stix_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn spec_version() -> String {
    STIX_SPEC_VERSION.to_string()
}

// ============================================================================
// PROVENANCE
// ============================================================================

/// Custom properties carried by every observable object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    pub container_id: String,
    pub timestamp: String,
    /// The raw trace line
    pub full_output: String,
}

impl From<&ObservableRecord> for Provenance {
    fn from(record: &ObservableRecord) -> Self {
        Self {
            container_id: record.container_id.clone(),
            timestamp: record.timestamp.clone(),
            full_output: record.raw_line.clone(),
        }
    }
}

// ============================================================================
// CYBER OBSERVABLES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileObject {
    pub id: String,
    pub spec_version: String,
    pub name: String,
    #[serde(flatten)]
    pub provenance: Provenance,
}

/// Shared by `ipv4-addr` and `ipv6-addr`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressObject {
    pub id: String,
    pub spec_version: String,
    pub value: String,
    #[serde(flatten)]
    pub provenance: Provenance,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainObject {
    pub id: String,
    pub spec_version: String,
    pub value: String,
    #[serde(flatten)]
    pub provenance: Provenance,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessObject {
    pub id: String,
    pub spec_version: String,
    pub command_line: String,
    #[serde(flatten)]
    pub provenance: Provenance,
    /// First quoted argument of the execve call, empty if none
    pub executable_path: String,
}

impl FileObject {
    pub fn new(record: &ObservableRecord) -> Self {
        Self {
            id: new_id("file"),
            spec_version: spec_version(),
            name: record.name.clone(),
            provenance: record.into(),
        }
    }
}

impl AddressObject {
    pub fn new(object_type: &str, record: &ObservableRecord) -> Self {
        Self {
            id: new_id(object_type),
            spec_version: spec_version(),
            value: record.name.clone(),
            provenance: record.into(),
        }
    }
}

impl DomainObject {
    pub fn new(record: &ObservableRecord) -> Self {
        Self {
            id: new_id("domain-name"),
            spec_version: spec_version(),
            value: record.name.clone(),
            provenance: record.into(),
        }
    }
}

impl ProcessObject {
    pub fn new(record: &ObservableRecord, executable_path: String) -> Self {
        Self {
            id: new_id("process"),
            spec_version: spec_version(),
            command_line: record.name.clone(),
            provenance: record.into(),
            executable_path,
        }
    }
}

// ============================================================================
// DOMAIN OBJECTS
// ============================================================================

/// One per non-empty category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grouping {
    pub id: String,
    pub spec_version: String,
    pub created: String,
    pub modified: String,
    pub name: String,
    pub context: String,
    pub object_refs: Vec<String>,
}

/// Summary referencing every observable of the run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MalwareAnalysis {
    pub id: String,
    pub spec_version: String,
    pub created: String,
    pub modified: String,
    pub product: String,
    pub analysis_sco_refs: Vec<String>,
}

// ============================================================================
// OBJECT ENUM & BUNDLE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StixObject {
    #[serde(rename = "file")]
    File(FileObject),
    #[serde(rename = "ipv4-addr")]
    Ipv4Addr(AddressObject),
    #[serde(rename = "ipv6-addr")]
    Ipv6Addr(AddressObject),
    #[serde(rename = "domain-name")]
    DomainName(DomainObject),
    #[serde(rename = "process")]
    Process(ProcessObject),
    #[serde(rename = "grouping")]
    Grouping(Grouping),
    #[serde(rename = "malware-analysis")]
    MalwareAnalysis(MalwareAnalysis),
}

impl StixObject {
    pub fn id(&self) -> &str {
        match self {
            StixObject::File(o) => &o.id,
            StixObject::Ipv4Addr(o) | StixObject::Ipv6Addr(o) => &o.id,
            StixObject::DomainName(o) => &o.id,
            StixObject::Process(o) => &o.id,
            StixObject::Grouping(o) => &o.id,
            StixObject::MalwareAnalysis(o) => &o.id,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            StixObject::File(_) => "file",
            StixObject::Ipv4Addr(_) => "ipv4-addr",
            StixObject::Ipv6Addr(_) => "ipv6-addr",
            StixObject::DomainName(_) => "domain-name",
            StixObject::Process(_) => "process",
            StixObject::Grouping(_) => "grouping",
            StixObject::MalwareAnalysis(_) => "malware-analysis",
        }
    }

    /// Cyber observables, as opposed to groupings and the summary
    pub fn is_observable(&self) -> bool {
        !matches!(self, StixObject::Grouping(_) | StixObject::MalwareAnalysis(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bundle {
    #[serde(rename = "type")]
    pub object_type: String,
    pub id: String,
    pub objects: Vec<StixObject>,
}

impl Bundle {
    pub fn new(objects: Vec<StixObject>) -> Self {
        Self {
            object_type: "bundle".to_string(),
            id: new_id("bundle"),
            objects,
        }
    }

    pub fn groupings(&self) -> impl Iterator<Item = &Grouping> {
        self.objects.iter().filter_map(|o| match o {
            StixObject::Grouping(g) => Some(g),
            _ => None,
        })
    }

    pub fn summaries(&self) -> impl Iterator<Item = &MalwareAnalysis> {
        self.objects.iter().filter_map(|o| match o {
            StixObject::MalwareAnalysis(m) => Some(m),
            _ => None,
        })
    }

    pub fn observables(&self) -> impl Iterator<Item = &StixObject> {
        self.objects.iter().filter(|o| o.is_observable())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
