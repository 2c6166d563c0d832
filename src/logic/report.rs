//! Report Runner
//!
//! Reads `<analysis>/logs/all.stap`, builds the bundle, writes
//! `<analysis>/stix-file.json`.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::constants::{DEFAULT_OUTPUT_FILE, DEFAULT_TRACE_FILE};
use crate::error::{TraceError, TraceResult};
use crate::logic::catalog::{Category, PatternCatalog};
use crate::logic::config::ScanConfig;
use crate::logic::lookup::{build_lookup, ReverseLookup};
use crate::logic::stix::{Bundle, ExportAdapter};
use crate::logic::trace::{Observables, TraceScanner};

// ============================================================================
// SUMMARY
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub bundle_id: String,
    pub output_path: PathBuf,
    pub working_dir: String,
    pub object_count: usize,
    /// Final record count per category, including empty ones
    pub counts: Vec<(Category, usize)>,
}

// ============================================================================
// PIPELINE
// ============================================================================

/// Trace text -> bundle. No file I/O; `lookup` is the only side effect.
pub fn process_trace(
    trace: &str,
    config: &ScanConfig,
    lookup: &dyn ReverseLookup,
) -> TraceResult<Bundle> {
    let (_, bundle) = scan_and_export(trace, config, lookup)?;
    Ok(bundle)
}

fn scan_and_export(
    trace: &str,
    config: &ScanConfig,
    lookup: &dyn ReverseLookup,
) -> TraceResult<(Observables, Bundle)> {
    config.validate()?;
    let catalog = PatternCatalog::standard()?;
    let observables = TraceScanner::new(&catalog, lookup)
        .with_config(config)
        .scan(trace)?;
    let bundle = ExportAdapter::new().export(&observables);
    Ok((observables, bundle))
}

/// Write the bundle as JSON, replacing any existing file
pub fn write_bundle(bundle: &Bundle, path: &Path) -> TraceResult<()> {
    let json = bundle.to_json()?;
    let mut file = File::create(path).map_err(|e| TraceError::io(path, e))?;
    file.write_all(json.as_bytes())
        .and_then(|_| file.flush())
        .map_err(|e| TraceError::io(path, e))?;
    Ok(())
}

/// Full run over one analysis directory
pub fn run(analysis_dir: &Path, config: &ScanConfig) -> TraceResult<ReportSummary> {
    let lookup = build_lookup(config.resolve_domains, config.cache_lookups);
    run_with_lookup(analysis_dir, config, lookup.as_ref())
}

pub fn run_with_lookup(
    analysis_dir: &Path,
    config: &ScanConfig,
    lookup: &dyn ReverseLookup,
) -> TraceResult<ReportSummary> {
    let trace_path = analysis_dir.join(DEFAULT_TRACE_FILE);
    log::info!("Reading trace {}", trace_path.display());
    let trace = std::fs::read_to_string(&trace_path).map_err(|e| TraceError::io(&trace_path, e))?;

    let (observables, bundle) = scan_and_export(&trace, config, lookup)?;

    let output_path = analysis_dir.join(DEFAULT_OUTPUT_FILE);
    write_bundle(&bundle, &output_path)?;
    log::info!("Wrote {}", output_path.display());

    Ok(ReportSummary {
        bundle_id: bundle.id.clone(),
        output_path,
        working_dir: observables.working_dir.path.clone(),
        object_count: bundle.objects.len(),
        counts: Category::ALL
            .iter()
            .map(|&c| (c, observables.get(c).len()))
            .collect(),
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::lookup::NoReverseLookup;
    use std::fs;
    use tempfile::tempdir;

    const TRACE: &str = concat!(
        "Mon Jan  1 12:00:00 2024.000001 a1| execve(\"/bin/sh\", [\"/bin/sh\", \"-c\", \"/build/dir/script.sh\"], []) = 0\n",
        "Mon Jan  1 12:00:00 2024.000002 a1| openat(AT_FDCWD, \"config.json\", O_RDONLY) = 3\n",
        "Mon Jan  1 12:00:00 2024.000003 a1| connect(4, {AF_INET, 8.8.8.8, 53}, 16) = 0\n",
        "Mon Jan  1 12:00:00 2024.000004 a1| read(3, \"...\", 4096) = 120\n",
    );

    fn analysis_dir(trace: &str) -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("logs")).unwrap();
        fs::write(dir.path().join("logs/all.stap"), trace).unwrap();
        dir
    }

    #[test]
    fn test_run_writes_bundle() {
        let dir = analysis_dir(TRACE);
        let summary = run_with_lookup(dir.path(), &ScanConfig::offline(), &NoReverseLookup).unwrap();

        assert_eq!(summary.output_path, dir.path().join("stix-file.json"));
        assert_eq!(summary.working_dir, "/build/dir");
        // file, ipv4, domain, summary, 3 groupings
        assert_eq!(summary.object_count, 7);
        assert!(summary.counts.contains(&(Category::FilesRead, 1)));
        assert!(summary.counts.contains(&(Category::ProcessesCreated, 0)));

        let written = fs::read_to_string(&summary.output_path).unwrap();
        let bundle: Bundle = serde_json::from_str(&written).unwrap();
        assert_eq!(bundle.id, summary.bundle_id);
        assert!(written.contains("/build/dir/config.json"));
    }

    #[test]
    fn test_run_without_trace_file() {
        let dir = tempdir().unwrap();
        let err = run_with_lookup(dir.path(), &ScanConfig::offline(), &NoReverseLookup).unwrap_err();
        assert!(matches!(err, TraceError::Io { .. }));
    }

    #[test]
    fn test_run_without_shell_invocation_writes_nothing() {
        let dir = analysis_dir("unlink(\"/tmp/a\") = 0\n");
        let err = run_with_lookup(dir.path(), &ScanConfig::offline(), &NoReverseLookup).unwrap_err();

        assert!(matches!(err, TraceError::WorkingDirectoryUnresolved));
        assert!(!dir.path().join("stix-file.json").exists());
    }

    #[test]
    fn test_process_trace_offline() {
        let bundle = process_trace(TRACE, &ScanConfig::offline(), &NoReverseLookup).unwrap();
        assert_eq!(bundle.groupings().count(), 3);
        assert_eq!(bundle.summaries().count(), 1);
    }

    #[test]
    fn test_run_matches_process_trace() {
        let dir = analysis_dir(TRACE);
        let summary = run_with_lookup(dir.path(), &ScanConfig::offline(), &NoReverseLookup).unwrap();
        let bundle = process_trace(TRACE, &ScanConfig::offline(), &NoReverseLookup).unwrap();

        let written: Bundle =
            serde_json::from_str(&fs::read_to_string(&summary.output_path).unwrap()).unwrap();
        let types = |b: &Bundle| b.objects.iter().map(|o| o.type_name()).collect::<Vec<_>>();
        assert_eq!(types(&written), types(&bundle));
        assert_eq!(summary.object_count, bundle.objects.len());
    }

    #[test]
    fn test_run_rejects_invalid_config() {
        let dir = analysis_dir(TRACE);
        let config = ScanConfig {
            whitelist: vec![String::new()],
            ..ScanConfig::offline()
        };
        let err = run_with_lookup(dir.path(), &config, &NoReverseLookup).unwrap_err();

        assert!(matches!(err, TraceError::Config(_)));
        assert!(!dir.path().join("stix-file.json").exists());
    }

    #[test]
    fn test_process_trace_rejects_invalid_config() {
        let config = ScanConfig {
            timestamp_width: 0,
            ..ScanConfig::offline()
        };
        assert!(matches!(
            process_trace(TRACE, &config, &NoReverseLookup),
            Err(TraceError::Config(_))
        ));
    }
}
