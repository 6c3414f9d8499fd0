//! Serialized shape of the migration records.

use migrate_model::{
    DateField, OrderNumber, ReferenceDataset, RepairRecord, SelectedRecord,
};

fn empty_record() -> RepairRecord {
    RepairRecord {
        maquina: None,
        num_maquina: None,
        marca: None,
        ordem_reparacao: OrderNumber::NotANumber,
        actualizada: None,
        observacoes: None,
        data_time: DateField::NotApplicable,
        acessorios: None,
        tipo: None,
        modelo_electrex: None,
        int_ext: None,
        utilizador: None,
        cliente: None,
        avarias: None,
        extras: None,
    }
}

#[test]
fn repair_record_field_order_is_stable() {
    let json = serde_json::to_string(&empty_record()).expect("serialize record");
    assert_eq!(
        json,
        "{\"Maquina\":null,\"NumMaquina\":null,\"Marca\":null,\"OrdemReparacao\":null,\
         \"Actualizada\":null,\"Observacoes\":null,\"DataTime\":null,\"Acessorios\":null,\
         \"Tipo\":null,\"ModeloElectrex\":null,\"IntExt\":null,\"Utilizador\":null,\
         \"Cliente\":null,\"Avarias\":null,\"Extras\":null}"
    );
}

#[test]
fn invalid_date_is_omitted_not_null() {
    let mut record = empty_record();
    record.data_time = DateField::Invalid;
    let value = serde_json::to_value(&record).expect("serialize record");
    let object = value.as_object().expect("object");
    assert!(!object.contains_key("DataTime"));
    assert_eq!(object.len(), 14);

    record.data_time = DateField::NotApplicable;
    let value = serde_json::to_value(&record).expect("serialize record");
    assert!(value["DataTime"].is_null());
}

#[test]
fn populated_record_serializes_values() {
    let mut record = empty_record();
    record.ordem_reparacao = OrderNumber::Value(1203);
    record.data_time = DateField::Value("2022-08-05T10:15:00.000Z".to_string());
    record.avarias = Some(vec!["Motor".to_string(), "Cabo".to_string()]);
    let value = serde_json::to_value(&record).expect("serialize record");
    assert_eq!(value["OrdemReparacao"], 1203);
    assert_eq!(value["DataTime"], "2022-08-05T10:15:00.000Z");
    assert_eq!(value["Avarias"], serde_json::json!(["Motor", "Cabo"]));
    assert!(value["Extras"].is_null());
}

#[test]
fn reference_values_are_single_field_objects() {
    let dataset = ReferenceDataset::from_values(
        "Clientes",
        "Cliente",
        vec!["Alfa".to_string(), "Beta".to_string()],
    );
    let json = serde_json::to_string(&dataset.values).expect("serialize values");
    assert_eq!(json, "[{\"Cliente\":\"Alfa\"},{\"Cliente\":\"Beta\"}]");
}

#[test]
fn selected_record_keeps_declared_order() {
    let mut record = SelectedRecord::new();
    record.set("Zona", Some("Norte".to_string()));
    record.set("Circuito", Some("C-12".to_string()));
    record.set("DataTime", None);
    let json = serde_json::to_string(&record).expect("serialize record");
    assert_eq!(
        json,
        "{\"Zona\":\"Norte\",\"Circuito\":\"C-12\",\"DataTime\":null}"
    );
}
