//! End-to-end runs over a temporary legacy export folder.

use std::fs;
use std::path::{Path, PathBuf};

use migrate_cli::config::MigrationConfig;
use migrate_cli::pipeline::{
    DUPLICATES_FILE, DatasetGroup, GroupStatus, PipelineContext, run_group, run_groups,
};
use migrate_model::ErrorKind;
use serde_json::{Value, json};
use tempfile::TempDir;

struct Fixture {
    _dir: TempDir,
    input: PathBuf,
    output: PathBuf,
    diagnostics: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let input = dir.path().join("old");
        let output = dir.path().join("new");
        let diagnostics = dir.path().join("diagnostics");
        fs::create_dir_all(&input).expect("create input");
        Self {
            _dir: dir,
            input,
            output,
            diagnostics,
        }
    }

    fn write_input(&self, name: &str, content: &str) {
        fs::write(self.input.join(name), content).expect("write input");
    }

    fn context(&self) -> PipelineContext {
        let config = MigrationConfig {
            input_dir: self.input.clone(),
            output_dir: self.output.clone(),
            diagnostics_dir: Some(self.diagnostics.clone()),
            ..MigrationConfig::default()
        };
        PipelineContext::from_config(&config).expect("context")
    }

    fn read_output(&self, relative: &str) -> Value {
        read_json(&self.output.join(relative))
    }
}

fn read_json(path: &Path) -> Value {
    let text = fs::read_to_string(path).expect("read output");
    assert!(text.ends_with('\n'), "missing trailing newline in {}", path.display());
    serde_json::from_str(&text).expect("parse output")
}

fn write_repair_list(fixture: &Fixture) {
    fixture.write_input(
        "tblRepairList.json",
        r#"[
  {"ID": 1, "Maquina": "Berbequim", "OrdemReparacao": "1001", "DataTime": "01/01/2021",
   "Avaria1": "Motor Avariado", "Cliente": "Oficina Lda"},
  {"ID": 2, "Maquina": "Rebarbadora", "OrdemReparacao": 1002, "DataTime": "01/06/2022",
   "Avaria2": "MOTOR AVARIADO ", "Cliente": "oficina lda", "Actualizada": true},
  {"ID": 3, "Maquina": "Serra", "OrdemReparacao": "abc", "DataTime": "01-03-2020",
   "Extra1": "Escovas", "Tipo": null}
]"#,
    );
}

#[test]
fn repair_list_group_writes_sorted_records_and_reference_sets() {
    let fixture = Fixture::new();
    write_repair_list(&fixture);

    let report = run_group(&fixture.context(), &DatasetGroup::RepairList);
    assert!(matches!(report.status, GroupStatus::Completed));
    assert_eq!(report.records, 3);
    assert_eq!(report.outputs.len(), 7);
    assert!(!report.has_errors());
    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.issues[0].kind, ErrorKind::NumericCoercionFailure);

    let records = fixture.read_output("tblRepairList.json");
    let dates: Vec<&str> = records
        .as_array()
        .expect("array")
        .iter()
        .map(|r| r["DataTime"].as_str().expect("date"))
        .collect();
    assert_eq!(
        dates,
        vec![
            "2022-06-01T00:00:00.000Z",
            "2021-01-01T00:00:00.000Z",
            "2020-03-01T00:00:00.000Z"
        ]
    );
    assert_eq!(records[0]["OrdemReparacao"], json!(1002));
    assert_eq!(records[0]["Actualizada"], json!("true"));
    assert_eq!(records[2]["OrdemReparacao"], Value::Null);
    assert_eq!(records[2]["Avarias"], Value::Null);

    // The 2022 record sorts first, so its spellings win.
    assert_eq!(
        fixture.read_output("reference/tblAvarias.json"),
        json!([{"Avaria": "MOTOR AVARIADO "}])
    );
    assert_eq!(
        fixture.read_output("reference/tblClientes.json"),
        json!([{"Cliente": "oficina lda"}])
    );
    assert_eq!(
        fixture.read_output("reference/tblMaquinas.json"),
        json!([{"Maquina": "Berbequim"}, {"Maquina": "Rebarbadora"}, {"Maquina": "Serra"}])
    );
    assert_eq!(fixture.read_output("reference/tblTipos.json"), json!([]));
    assert_eq!(report.duplicates.total, 2);
}

#[test]
fn circuits_group_reads_csv_and_merges_catalogue() {
    let fixture = Fixture::new();
    fixture.write_input(
        "tblCircuitoList.csv",
        "ID;Circuito;Data;Obs\n1;C-2;05/08/2022;\n2;c-1;2021-02-03;ok\n3;C-9;;\n",
    );
    fixture.write_input(
        "tblCI.json",
        r#"[{"ID": 1, "Circuito": "C-1"}, {"ID": 2, "Circuito": "C-2"}]"#,
    );

    let report = run_group(&fixture.context(), &DatasetGroup::Circuits);
    assert!(!report.has_errors());

    let list = fixture.read_output("tblCircuitoList.json");
    assert_eq!(
        list,
        json!([
            {"Circuito": "C-2", "Obs": "", "DataTime": "2022-08-05T00:00:00.000Z"},
            {"Circuito": "c-1", "Obs": "ok", "DataTime": "2021-02-03T00:00:00.000Z"},
            {"Circuito": "C-9", "Obs": "", "DataTime": null}
        ])
    );
    assert_eq!(
        fixture.read_output("tblCI.json"),
        json!([{"Circuito": "C-1"}, {"Circuito": "C-2"}, {"Circuito": "C-9"}])
    );
}

#[test]
fn clients_defects_and_lookups() {
    let fixture = Fixture::new();
    fixture.write_input(
        "tblClientes.json",
        r#"[{"ID": 1, "Cliente": "Zé Pinto"}, {"ID": 2, "Cliente": ""}]"#,
    );
    fixture.write_input(
        "tblCliente.json",
        r#"[{"ID": 7, "Cliente": "ZE PINTO"}, {"ID": 8, "Cliente": "Alves"}]"#,
    );
    fixture.write_input(
        "tblAvarias.json",
        r#"[{"Avarias2": "Cabo", "Avarias1": "Motor", "Avarias10": "Escovas", "Avarias3": ""},
            {"Avarias1": "ignored"}]"#,
    );
    fixture.write_input(
        "tblMarca.csv",
        "ID;Marca\n1;Bosch\n2;BOSCH\n3;Makita\n",
    );

    let ctx = fixture.context();
    let groups = [
        DatasetGroup::Clients,
        DatasetGroup::Defects,
        DatasetGroup::Lookup("Marca".to_string()),
    ];
    let report = run_groups(&ctx, &groups);
    assert!(!report.has_errors());

    assert_eq!(
        fixture.read_output("tblClientes.json"),
        json!([{"Cliente": "Alves"}, {"Cliente": "Zé Pinto"}])
    );
    assert_eq!(
        fixture.read_output("tblAvarias.json"),
        json!([{"Avaria": "Motor"}, {"Avaria": "Cabo"}, {"Avaria": "Escovas"}])
    );
    assert_eq!(
        fixture.read_output("tblMarca.json"),
        json!([{"Marca": "Bosch"}, {"Marca": "Makita"}])
    );

    let audit = read_json(&fixture.diagnostics.join(DUPLICATES_FILE));
    assert_eq!(audit["total"], json!(2));
    assert_eq!(
        audit["groups"]["clients"]["categories"]["Clientes"]["duplicates"][0]["value"],
        json!("ZE PINTO")
    );
    assert_eq!(
        audit["groups"]["Marca"]["categories"]["Marca"]["distinct"],
        json!(2)
    );
}

#[test]
fn missing_input_aborts_only_its_group() {
    let fixture = Fixture::new();
    write_repair_list(&fixture);
    // tblCI is missing, so the circuit list must not be written either.
    fixture.write_input("tblCircuitoList.json", r#"[{"Circuito": "C-1"}]"#);

    let report = run_groups(
        &fixture.context(),
        &[DatasetGroup::Circuits, DatasetGroup::RepairList],
    );
    assert!(report.has_errors());

    let circuits = &report.groups[0];
    match &circuits.status {
        GroupStatus::Aborted(error) => {
            assert_eq!(error.kind(), ErrorKind::InputNotFound);
            assert!(error.to_string().contains("tblCI"));
        }
        GroupStatus::Completed => panic!("circuits should abort"),
    }
    assert!(circuits.outputs.is_empty());
    assert!(!fixture.output.join("tblCircuitoList.json").exists());

    assert!(!report.groups[1].has_errors());
    assert!(fixture.output.join("tblRepairList.json").exists());
}

#[test]
fn unparseable_input_aborts_group() {
    let fixture = Fixture::new();
    fixture.write_input("tblRepairList.json", "{\"not\": \"an array\"}");

    let report = run_group(&fixture.context(), &DatasetGroup::RepairList);
    match &report.status {
        GroupStatus::Aborted(error) => assert_eq!(error.kind(), ErrorKind::InputParseError),
        GroupStatus::Completed => panic!("expected abort"),
    }
    assert!(!fixture.output.exists());
}

#[test]
fn failed_write_does_not_stop_other_writes() {
    let fixture = Fixture::new();
    write_repair_list(&fixture);
    // A plain file where the reference directory should be.
    fs::create_dir_all(&fixture.output).expect("create output");
    fs::write(fixture.output.join("reference"), "blocker").expect("write blocker");

    let report = run_group(&fixture.context(), &DatasetGroup::RepairList);
    assert!(matches!(report.status, GroupStatus::Completed));
    assert_eq!(report.failed_writes(), 6);
    assert!(report.has_errors());
    assert!(report.outputs[0].is_ok());
    assert!(fixture.output.join("tblRepairList.json").exists());
}
