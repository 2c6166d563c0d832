//! Deduplication & Ordering
//!
//! Per-category accumulator keyed by `(name, container_id)`.
//! First insertion wins: a later duplicate never replaces the stored
//! provenance (`raw_line`, `timestamp`).

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use super::types::{ObservableKey, ObservableRecord};

#[derive(Debug, Clone, Default)]
pub struct ObservableSet {
    entries: BTreeMap<ObservableKey, ObservableRecord>,
}

impl ObservableSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the identity was already present (no-op)
    pub fn insert(&mut self, record: ObservableRecord) -> bool {
        match self.entries.entry(record.key()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(record);
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ascending by name, ties broken by container id
    pub fn into_sorted(self) -> Vec<ObservableRecord> {
        self.entries.into_values().collect()
    }
}
