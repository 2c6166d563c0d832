use super::*;
use crate::logic::catalog::{Category, PatternCatalog};
use crate::logic::config::ScanConfig;
use crate::logic::lookup::NoReverseLookup;
use crate::logic::trace::{scan_trace, Observables};
use chrono::{TimeZone, Utc};

const LAUNCH: &str = r#"execve("/bin/sh", ["/bin/sh", "-c", "/build/dir/script.sh"], []) = 0"#;

fn observe(lines: &[&str]) -> Observables {
    let catalog = PatternCatalog::standard().unwrap();
    scan_trace(&lines.join("\n"), &catalog, &ScanConfig::offline(), &NoReverseLookup).unwrap()
}

#[test]
fn test_launch_only_trace_has_one_summary_and_no_groupings() {
    let bundle = ExportAdapter::new().export(&observe(&[LAUNCH]));

    assert_eq!(bundle.groupings().count(), 0);
    assert_eq!(bundle.summaries().count(), 1);
    assert_eq!(bundle.objects.len(), 1);
    assert!(bundle.summaries().all(|s| s.analysis_sco_refs.is_empty()));
    assert!(bundle.id.starts_with("bundle--"));
}

#[test]
fn test_process_export_collapses_across_containers() {
    let observables = observe(&[
        LAUNCH,
        r#"aaa111| execve("/usr/bin/npm", ["npm", "install"], 0x0) = 0"#,
        r#"bbb222| execve("/usr/bin/npm", ["npm", "install"], 0x0) = 0"#,
    ]);
    assert_eq!(observables.get(Category::ProcessesCreated).len(), 2);

    let bundle = ExportAdapter::new().export(&observables);
    let processes: Vec<_> = bundle
        .objects
        .iter()
        .filter_map(|o| match o {
            StixObject::Process(p) => Some(p),
            _ => None,
        })
        .collect();

    assert_eq!(processes.len(), 1);
    assert_eq!(processes[0].command_line, "npm install");
    assert_eq!(processes[0].executable_path, "/usr/bin/npm");
    assert_eq!(processes[0].provenance.container_id, "aaa111");
}

#[test]
fn test_one_grouping_per_non_empty_category() {
    let observables = observe(&[
        LAUNCH,
        r#"unlink("stage.sh") = 0"#,
        "connect(3, {AF_INET, 8.8.8.8, 53}, 16) = 0",
    ]);
    let bundle = ExportAdapter::new().export(&observables);

    let names: Vec<_> = bundle.groupings().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["files_removed", "hosts_connected", "domains"]);
    assert!(bundle
        .groupings()
        .all(|g| g.context == "suspicious-activity" && !g.object_refs.is_empty()));
}

#[test]
fn test_summary_references_every_observable() {
    let observables = observe(&[
        LAUNCH,
        r#"openat(AT_FDCWD, "/etc/passwd", O_RDONLY|O_CLOEXEC) = 3"#,
        r#"mkdir("out", 0755) = 0"#,
        r#"execve("/bin/ls", ["ls", "-la"], 0x0) = 0"#,
    ]);
    let bundle = ExportAdapter::new().export(&observables);

    let observable_ids: Vec<_> = bundle.observables().map(|o| o.id().to_string()).collect();
    let summary = bundle.summaries().next().unwrap();
    assert_eq!(summary.analysis_sco_refs, observable_ids);
    assert_eq!(summary.product, "cuckoo-sandbox");
    assert_eq!(observable_ids.len(), 3);

    // observables first, then the summary, then groupings
    assert!(bundle.objects[..3].iter().all(|o| o.is_observable()));
    assert_eq!(bundle.objects[3].type_name(), "malware-analysis");
    assert!(bundle.objects[4..].iter().all(|o| o.type_name() == "grouping"));
}

#[test]
fn test_grouping_refs_match_its_objects() {
    let observables = observe(&[
        LAUNCH,
        r#"unlink("/tmp/a") = 0"#,
        r#"unlink("/tmp/b") = 0"#,
    ]);
    let bundle = ExportAdapter::new().export(&observables);

    let grouping = bundle.groupings().next().unwrap();
    let file_ids: Vec<_> = bundle
        .objects
        .iter()
        .filter(|o| o.type_name() == "file")
        .map(|o| o.id().to_string())
        .collect();
    assert_eq!(grouping.object_refs, file_ids);
}

#[test]
fn test_json_shape() {
    let observables = observe(&[
        LAUNCH,
        r#"c0ffee| execve("/usr/bin/curl", ["curl", "http://evil"], 0x0) = 0"#,
    ]);
    let created = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
    let bundle = ExportAdapter::at(created).export(&observables);

    let json: serde_json::Value = serde_json::from_str(&bundle.to_json().unwrap()).unwrap();
    assert_eq!(json["type"], "bundle");

    let process = &json["objects"][0];
    assert_eq!(process["type"], "process");
    assert_eq!(process["spec_version"], "2.1");
    assert_eq!(process["command_line"], "curl http://evil");
    assert_eq!(process["container_id"], "c0ffee");
    assert_eq!(process["executable_path"], "/usr/bin/curl");
    assert!(process["full_output"].as_str().unwrap().contains("execve"));

    let summary = &json["objects"][1];
    assert_eq!(summary["type"], "malware-analysis");
    assert_eq!(summary["created"], "2024-01-02T03:04:05.000Z");

    let grouping = &json["objects"][2];
    assert_eq!(grouping["type"], "grouping");
    assert_eq!(grouping["name"], "processes_created");
}

#[test]
fn test_bundle_round_trips_through_serde() {
    let observables = observe(&[LAUNCH, "connect(3, {AF_INET6, ::1, 8080}, 28) = 0"]);
    let bundle = ExportAdapter::new().export(&observables);

    let parsed: Bundle = serde_json::from_str(&bundle.to_json().unwrap()).unwrap();
    assert_eq!(parsed, bundle);
    assert_eq!(parsed.objects[0].type_name(), "ipv6-addr");
}

#[test]
fn test_fresh_bundle_id_per_export() {
    let observables = observe(&[LAUNCH]);
    let adapter = ExportAdapter::new();
    assert_ne!(adapter.export(&observables).id, adapter.export(&observables).id);
}
