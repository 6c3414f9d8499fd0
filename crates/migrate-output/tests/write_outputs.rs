//! Writing output sets to disk.

use std::fs;

use migrate_model::{ReferenceDataset, SelectedRecord};
use migrate_output::{OutputError, OutputSet, write_json};
use tempfile::TempDir;

#[test]
fn failed_write_does_not_stop_the_rest() {
    let dir = TempDir::new().expect("create temp dir");
    // A regular file where a directory is expected makes the second write fail.
    let blocker = dir.path().join("reference");
    fs::write(&blocker, "not a directory").expect("write blocker");

    let mut set = OutputSet::new();
    set.push(dir.path().join("tblA.json"), &["a"]);
    set.push(blocker.join("tblB.json"), &["b"]);
    set.push(dir.path().join("tblC.json"), &["c"]);

    let outcomes = set.write_all();
    let ok: Vec<bool> = outcomes.iter().map(|o| o.is_ok()).collect();
    assert_eq!(ok, vec![true, false, true]);
    assert!(matches!(outcomes[1].error(), Some(OutputError::Io { .. })));
    assert!(dir.path().join("tblC.json").exists());
}

#[test]
fn reference_dataset_file_shape() {
    let dir = TempDir::new().expect("create temp dir");
    let dataset = ReferenceDataset::from_values(
        "Clientes",
        "Cliente",
        vec!["Alfa".to_string(), "Beta".to_string()],
    );
    let path = dir.path().join(dataset.file_name());
    write_json(&path, &dataset.values).expect("write dataset");

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).expect("read back")).expect("parse");
    insta::assert_json_snapshot!(value, @r#"
    [
      {
        "Cliente": "Alfa"
      },
      {
        "Cliente": "Beta"
      }
    ]
    "#);
}

#[test]
fn selected_records_keep_field_order_on_disk() {
    let dir = TempDir::new().expect("create temp dir");
    let mut record = SelectedRecord::new();
    record.set("Zona", Some("Norte".to_string()));
    record.set("DataTime", None);

    let mut set = OutputSet::new();
    set.push(dir.path().join("tblCircuitoList.json"), &[record]);
    assert!(set.write_all().iter().all(|o| o.is_ok()));

    let text = fs::read_to_string(dir.path().join("tblCircuitoList.json")).expect("read back");
    assert_eq!(
        text,
        "[\n  {\n    \"Zona\": \"Norte\",\n    \"DataTime\": null\n  }\n]\n"
    );
}
