use fstree::output::{self, OutputFormat};
use fstree::{FsTreeError, MarshalResult, load_records, marshal_fs_tree};
use std::fs;
use tempfile::tempdir;
const RECORDS: &str = r#"[
    {"id": 1, "parent_id": 1, "name": "home", "is_dir": true},
    {"id": 2, "parent_id": 1, "name": "am", "is_dir": true},
    {"id": 3, "parent_id": 2, "name": "personal", "is_dir": true},
    {"id": 3, "parent_id": 2, "name": "personal", "is_dir": true},
    {"id": 4, "parent_id": 3, "name": "resume.doc", "is_dir": false}
]"#;
#[test]
fn integration_full_flow() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("records.json");
    fs::write(&input, RECORDS).unwrap();
    let records = load_records(&input).unwrap();
    assert_eq!(records.len(), 5);
    let result = marshal_fs_tree(&records).unwrap();
    let out = dir.path().join(format!("forest.{}", OutputFormat::Json.extension()));
    output::write_result_to_file(&result, OutputFormat::Json, &out, true).unwrap();
    let written: MarshalResult = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(written, result);
    assert_eq!(written.duplicates[0].level_found, 2);
}
#[test]
fn integration_text_output() {
    let records = fstree::parse_records(RECORDS).unwrap();
    let result = marshal_fs_tree(&records).unwrap();
    let text = output::format_result(&result, OutputFormat::Text, false).unwrap();
    assert!(text.contains("1 roots, 4 nodes"));
    assert!(text.contains("Duplicates:"));
    assert!(text.contains("id 3 (personal) at level 2"));
    let tree = output::format_result(&result, OutputFormat::Tree, false).unwrap();
    assert!(tree.starts_with("home/  # 1"));
}
#[test]
fn integration_bad_input() {
    let dir = tempdir().unwrap();
    let missing = load_records(dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(missing, FsTreeError::Io { .. }));
    let broken = dir.path().join("broken.json");
    fs::write(&broken, "[{\"id\": 1}]").unwrap();
    assert!(matches!(load_records(&broken), Err(FsTreeError::Json(_))));
}
#[test]
fn integration_duplicate_report_to_file() {
    let dir = tempdir().unwrap();
    let records = fstree::parse_records(RECORDS).unwrap();
    let report = fstree::check_duplicate_ids(&records).unwrap();
    let out = dir.path().join("report.json");
    output::write_report_to_file(&report, OutputFormat::Json, &out, false).unwrap();
    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(written["level"], 2);
    assert_eq!(written["node"]["id"], 3);
    assert_eq!(written["node"]["name"], "personal");
    let text = output::format_report(&report, OutputFormat::Text, false).unwrap();
    assert_eq!(text, "duplicate id 3 (personal) at level 2");
    let none = output::format_report(&(None, 0), OutputFormat::Tree, false).unwrap();
    assert_eq!(none, "no duplicates");
}
