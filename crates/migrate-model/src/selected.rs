use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// An open-schema record kept in declared field order.
///
/// Used for tables whose columns are not known up front: the selected source
/// columns are copied in file order and derived fields are appended. `None`
/// serializes as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedRecord {
    fields: Vec<(String, Option<String>)>,
}

impl SelectedRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field, or replaces the value of an existing one in place.
    pub fn set(&mut self, field: impl Into<String>, value: Option<String>) {
        let field = field.into();
        if let Some(slot) = self.fields.iter_mut().find(|(name, _)| *name == field) {
            slot.1 = value;
        } else {
            self.fields.push((field, value));
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .and_then(|(_, value)| value.as_deref())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.iter().any(|(name, _)| name == field)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for SelectedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_replaces_in_place() {
        let mut record = SelectedRecord::new();
        record.set("Circuito", Some("C1".to_string()));
        record.set("Obs", None);
        record.set("Circuito", Some("C2".to_string()));
        let names: Vec<&str> = record.field_names().collect();
        assert_eq!(names, vec!["Circuito", "Obs"]);
        assert_eq!(record.get("Circuito"), Some("C2"));
        assert_eq!(record.get("Obs"), None);
        assert!(record.contains("Obs"));
        assert!(!record.contains("ID"));
    }
}
