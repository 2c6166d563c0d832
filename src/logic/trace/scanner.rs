//! Trace Scanner
//!
//! One batch pass over the trace: keyword gate, every classifier's patterns,
//! normalization, whitelist, then the per-category accumulators.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use super::accumulator::ObservableSet;
use super::cwd::resolve_working_dir;
use super::filter::{LineFilter, Whitelist};
use super::types::{ObservableRecord, WorkingDirectory};
use crate::constants::TIMESTAMP_WIDTH;
use crate::error::TraceResult;
use crate::logic::catalog::rules::CONTAINER_ID_PATTERN;
use crate::logic::catalog::{Category, NormalizeContext, PatternCatalog};
use crate::logic::config::ScanConfig;
use crate::logic::lookup::ReverseLookup;

static CONTAINER_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(CONTAINER_ID_PATTERN).expect("container id pattern is valid"));

// ============================================================================
// LINE HELPERS
// ============================================================================

/// Leading `<token>|` of a line, empty if absent
pub fn container_id(line: &str) -> String {
    CONTAINER_ID
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// First `width` characters of a line
pub fn timestamp_prefix(line: &str, width: usize) -> String {
    line.chars().take(width).collect()
}

// ============================================================================
// OUTPUT
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub lines_total: usize,
    pub lines_relevant: usize,
    /// Non-empty normalized captures
    pub candidates: usize,
    /// Dropped by the whitelist
    pub suppressed: usize,
    /// Identity already present in the accumulator
    pub duplicates: usize,
}

/// Final, sorted per-category sequences of one run
#[derive(Debug, Clone)]
pub struct Observables {
    pub working_dir: WorkingDirectory,
    categories: BTreeMap<Category, Vec<ObservableRecord>>,
    pub stats: ScanStats,
}

impl Observables {
    /// Records of a category; empty slice if it produced nothing
    pub fn get(&self, category: Category) -> &[ObservableRecord] {
        self.categories
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Categories with at least one record, in export order
    pub fn non_empty(&self) -> impl Iterator<Item = (Category, &[ObservableRecord])> {
        self.categories
            .iter()
            .filter(|(_, records)| !records.is_empty())
            .map(|(category, records)| (*category, records.as_slice()))
    }

    pub fn total(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

// ============================================================================
// SCANNER
// ============================================================================

pub struct TraceScanner<'a> {
    catalog: &'a PatternCatalog,
    lookup: &'a dyn ReverseLookup,
    whitelist: Whitelist,
    timestamp_width: usize,
}

impl<'a> TraceScanner<'a> {
    pub fn new(catalog: &'a PatternCatalog, lookup: &'a dyn ReverseLookup) -> Self {
        Self {
            catalog,
            lookup,
            whitelist: Whitelist::default(),
            timestamp_width: TIMESTAMP_WIDTH,
        }
    }

    pub fn with_config(mut self, config: &ScanConfig) -> Self {
        self.whitelist = Whitelist::new(config.whitelist.iter().cloned());
        self.timestamp_width = config.timestamp_width;
        self
    }

    /// Resolve the working directory, then scan every line.
    /// Fails before any category is populated if resolution fails.
    pub fn scan(&self, trace: &str) -> TraceResult<Observables> {
        let working_dir = resolve_working_dir(trace)?;

        let mut sets: BTreeMap<Category, ObservableSet> = self
            .catalog
            .categories()
            .into_iter()
            .map(|category| (category, ObservableSet::new()))
            .collect();
        let mut stats = ScanStats::default();

        let filter = LineFilter::new(self.catalog.keywords());
        let ctx = NormalizeContext {
            working_dir: &working_dir.path,
            lookup: self.lookup,
        };

        for (index, line) in trace.lines().enumerate() {
            stats.lines_total += 1;

            // The launcher's own `sh -c` line is not sample behaviour
            if index == working_dir.line_index || !filter.is_relevant(line) {
                continue;
            }
            stats.lines_relevant += 1;

            let container = container_id(line);
            let timestamp = timestamp_prefix(line, self.timestamp_width);

            for classifier in self.catalog.classifiers() {
                for capture in classifier.extract(line) {
                    let name = classifier.normalize(&capture, &ctx);
                    if name.is_empty() {
                        continue;
                    }
                    stats.candidates += 1;

                    if self.whitelist.is_whitelisted(&name) {
                        log::trace!("Whitelisted {} candidate: {}", classifier.category(), name);
                        stats.suppressed += 1;
                        continue;
                    }

                    let record = ObservableRecord {
                        name,
                        container_id: container.clone(),
                        raw_line: line.to_string(),
                        timestamp: timestamp.clone(),
                    };
                    let inserted = sets
                        .entry(classifier.category())
                        .or_default()
                        .insert(record);
                    if !inserted {
                        stats.duplicates += 1;
                    }
                }
            }
        }

        let categories: BTreeMap<Category, Vec<ObservableRecord>> = sets
            .into_iter()
            .map(|(category, set)| (category, set.into_sorted()))
            .collect();

        for (category, records) in &categories {
            log::debug!("{}: {} observables", category, records.len());
        }
        log::info!(
            "Scanned {} lines ({} relevant): {} candidates, {} whitelisted, {} duplicates",
            stats.lines_total,
            stats.lines_relevant,
            stats.candidates,
            stats.suppressed,
            stats.duplicates
        );

        Ok(Observables {
            working_dir,
            categories,
            stats,
        })
    }
}

/// Scan with the settings of `config`
pub fn scan_trace(
    trace: &str,
    catalog: &PatternCatalog,
    config: &ScanConfig,
    lookup: &dyn ReverseLookup,
) -> TraceResult<Observables> {
    TraceScanner::new(catalog, lookup)
        .with_config(config)
        .scan(trace)
}
