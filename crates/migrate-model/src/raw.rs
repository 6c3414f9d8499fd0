//! Raw rows from the legacy exports.

/// A source row: column name to string value, in file order.
///
/// Columns are kept in a vector so that iteration order is the order the
/// columns appeared in the source, independent of any hashing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    columns: Vec<(String, String)>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from `(column, value)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut record = Self::new();
        for (column, value) in pairs {
            record.insert(column, value);
        }
        record
    }

    /// Inserts a value; the column name is trimmed.
    ///
    /// A repeated column keeps its first position and takes the later value.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        let column = column.into();
        let column = column.trim();
        let value = value.into();
        if let Some(slot) = self.columns.iter_mut().find(|(name, _)| name == column) {
            slot.1 = value;
        } else {
            self.columns.push((column.to_string(), value));
        }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    /// Three-state view of a column.
    pub fn field(&self, column: &str) -> FieldValue<'_> {
        FieldValue::from_option(self.get(column))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Presence of a source value.
///
/// `Empty` covers columns that exist but hold only whitespace. `Value`
/// carries the text verbatim (untrimmed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Absent,
    Empty,
    Value(&'a str),
}

impl<'a> FieldValue<'a> {
    pub fn from_option(value: Option<&'a str>) -> Self {
        match value {
            None => Self::Absent,
            Some(text) if text.trim().is_empty() => Self::Empty,
            Some(text) => Self::Value(text),
        }
    }

    pub fn value(self) -> Option<&'a str> {
        match self {
            Self::Value(text) => Some(text),
            Self::Absent | Self::Empty => None,
        }
    }

    /// Owned value, `None` for absent and empty.
    pub fn to_option(self) -> Option<String> {
        self.value().map(str::to_string)
    }
}
