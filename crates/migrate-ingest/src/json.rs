//! JSON row arrays.
//!
//! A table is a top-level array of flat objects. Object keys keep their file
//! order. Strings are kept as-is, numbers and booleans become their text
//! form, and `null` means the column is absent from that row.

use std::fmt;
use std::path::Path;

use migrate_model::RawRecord;
use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};

use crate::error::{IngestError, Result};

/// Parses a JSON row array.
pub fn parse_json_rows(text: &str, path: &Path) -> Result<Vec<RawRecord>> {
    let rows: Vec<JsonRow> = serde_json::from_str(text).map_err(|e| IngestError::JsonParse {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(rows.into_iter().map(|row| row.0).collect())
}

struct JsonRow(RawRecord);

impl<'de> Deserialize<'de> for JsonRow {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(RowVisitor)
    }
}

struct RowVisitor;

impl<'de> Visitor<'de> for RowVisitor {
    type Value = JsonRow;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a row object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<JsonRow, A::Error> {
        let mut record = RawRecord::new();
        while let Some((column, cell)) = map.next_entry::<String, Cell>()? {
            if let Cell::Text(value) = cell {
                record.insert(column, value);
            }
        }
        Ok(JsonRow(record))
    }
}

enum Cell {
    Text(String),
    Null,
}

impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(CellVisitor)
    }
}

struct CellVisitor;

impl<'de> Visitor<'de> for CellVisitor {
    type Value = Cell;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, number, boolean or null")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<Cell, E> {
        Ok(Cell::Text(value.to_string()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> std::result::Result<Cell, E> {
        Ok(Cell::Text(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> std::result::Result<Cell, E> {
        Ok(Cell::Text(value.to_string()))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> std::result::Result<Cell, E> {
        Ok(Cell::Text(value.to_string()))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> std::result::Result<Cell, E> {
        Ok(Cell::Text(value.to_string()))
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> std::result::Result<Cell, E> {
        Ok(Cell::Text(value.to_string()))
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Cell, E> {
        Ok(Cell::Null)
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Cell, E> {
        Ok(Cell::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_key_order_and_scalars() {
        let text = r#"[{"Zona":"Norte","ID":7,"Activo":true,"Peso":1.5,"Obs":null}]"#;
        let rows = parse_json_rows(text, Path::new("t.json")).unwrap();
        assert_eq!(rows.len(), 1);
        let pairs: Vec<(&str, &str)> = rows[0].iter().collect();
        assert_eq!(
            pairs,
            vec![("Zona", "Norte"), ("ID", "7"), ("Activo", "true"), ("Peso", "1.5")]
        );
        assert_eq!(rows[0].get("Obs"), None);
    }

    #[test]
    fn test_nested_values_are_rejected() {
        let err = parse_json_rows(r#"[{"A":[1,2]}]"#, Path::new("t.json")).unwrap_err();
        assert!(matches!(err, IngestError::JsonParse { .. }));
    }

    #[test]
    fn test_top_level_must_be_array() {
        let err = parse_json_rows(r#"{"A":"1"}"#, Path::new("t.json")).unwrap_err();
        assert!(matches!(err, IngestError::JsonParse { .. }));
    }

    #[test]
    fn test_keys_are_trimmed() {
        let rows = parse_json_rows(r#"[{" Cliente ":"Alfa"}]"#, Path::new("t.json")).unwrap();
        assert_eq!(rows[0].get("Cliente"), Some("Alfa"));
    }
}
