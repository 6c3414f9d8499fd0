//! Declared layout of the wide repair-list rows.
//!
//! The legacy table spreads list fields over numbered scalar columns
//! (`Avaria1`..`Avaria30`). The schema names every column the transformer
//! reads so nothing is inferred from the data.

use migrate_model::RawRecord;
use migrate_model::record::columns;

/// A list field stored as `prefix1`..`prefix{max}` columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexedList {
    pub prefix: &'static str,
    pub max: usize,
}

impl IndexedList {
    pub const fn new(prefix: &'static str, max: usize) -> Self {
        Self { prefix, max }
    }

    pub fn column(&self, index: usize) -> String {
        format!("{}{}", self.prefix, index)
    }

    /// Non-empty values in index order, gaps skipped. `None` when none.
    pub fn collect(&self, row: &RawRecord) -> Option<Vec<String>> {
        let values: Vec<String> = (1..=self.max)
            .filter_map(|index| row.field(&self.column(index)).to_option())
            .collect();
        (!values.is_empty()).then_some(values)
    }

    /// True when `column` is one of this list's indexed columns.
    pub fn owns(&self, column: &str) -> bool {
        column
            .strip_prefix(self.prefix)
            .filter(|suffix| suffix.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|suffix| suffix.parse::<usize>().ok())
            .is_some_and(|index| (1..=self.max).contains(&index))
    }
}

pub const AVARIAS: IndexedList = IndexedList::new("Avaria", 30);
pub const EXTRAS: IndexedList = IndexedList::new("Extra", 3);

/// Scalar columns of `tblRepairList`, in output order.
pub const REPAIR_SCALAR_COLUMNS: [&str; 13] = [
    columns::MAQUINA,
    columns::NUM_MAQUINA,
    columns::MARCA,
    columns::ORDEM_REPARACAO,
    columns::ACTUALIZADA,
    columns::OBSERVACOES,
    columns::DATA_TIME,
    columns::ACESSORIOS,
    columns::TIPO,
    columns::MODELO_ELECTREX,
    columns::INT_EXT,
    columns::UTILIZADOR,
    columns::CLIENTE,
];

/// Scalar and list columns consumed from a repair-list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairListSchema {
    pub scalars: &'static [&'static str],
    pub avarias: IndexedList,
    pub extras: IndexedList,
}

impl Default for RepairListSchema {
    fn default() -> Self {
        Self {
            scalars: &REPAIR_SCALAR_COLUMNS,
            avarias: AVARIAS,
            extras: EXTRAS,
        }
    }
}

impl RepairListSchema {
    pub fn is_known(&self, column: &str) -> bool {
        self.scalars.contains(&column) || self.avarias.owns(column) || self.extras.owns(column)
    }

    /// Source columns the schema does not read, in row order.
    pub fn unmapped_columns<'a>(&self, row: &'a RawRecord) -> Vec<&'a str> {
        row.column_names()
            .filter(|column| !self.is_known(column))
            .collect()
    }
}
