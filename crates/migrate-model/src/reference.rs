//! Reference datasets: one distinct value per entry.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// A single-field record such as `{"Cliente": "Oficina Lda"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceValue {
    pub field: String,
    pub value: String,
}

impl ReferenceValue {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl Serialize for ReferenceValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.field, &self.value)?;
        map.end()
    }
}

/// The distinct values of one category, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceDataset {
    /// Output name, e.g. `Clientes`.
    pub dataset: String,
    /// Name of the single field of every entry, e.g. `Cliente`.
    pub field: String,
    pub values: Vec<ReferenceValue>,
}

impl ReferenceDataset {
    /// Wraps plain values into entries, keeping their order.
    pub fn from_values<I>(dataset: &str, field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            dataset: dataset.to_string(),
            field: field.to_string(),
            values: values
                .into_iter()
                .map(|value| ReferenceValue::new(field, value))
                .collect(),
        }
    }

    pub fn file_name(&self) -> String {
        format!("tbl{}.json", self.dataset)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn value_strs(&self) -> Vec<&str> {
        self.values.iter().map(|entry| entry.value.as_str()).collect()
    }
}
