//! Reference dataset extraction.
//!
//! A [`DatasetExtractor`] walks records once, feeds every non-empty value of
//! each declared [`Category`] through a [`DedupIndex`], and wraps the kept
//! values as single-field reference entries.

use migrate_model::record::columns;
use migrate_model::{FieldValue, RawRecord, ReferenceDataset, RepairRecord, SelectedRecord};
use migrate_normalize::DedupIndex;
use tracing::debug;

/// Dataset name to entry field name.
///
/// Datasets not listed here use their own name as the field name.
pub const CATEGORY_FIELDS: [(&str, &str); 6] = [
    ("Avarias", "Avaria"),
    ("Extras", "Extra"),
    ("Clientes", "Cliente"),
    ("Maquinas", "Maquina"),
    ("Tipos", "Tipo"),
    ("ModelosElectrex", "ModeloElectrex"),
];

pub fn category_field(dataset: &str) -> &str {
    CATEGORY_FIELDS
        .iter()
        .find(|(name, _)| *name == dataset)
        .map_or(dataset, |(_, field)| *field)
}

/// Where a category's values come from in a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSource {
    /// One scalar column.
    Column(String),
    /// A list field (`Avarias` on a repair record), or on raw rows the
    /// numbered columns `{name}1`, `{name}2`, ... in index order.
    List(String),
}

/// Order of the values in the written dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueOrder {
    /// Codepoint order.
    Sorted,
    /// Order of first appearance.
    FirstSeen,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub dataset: String,
    pub field: String,
    pub source: FieldSource,
    pub order: ValueOrder,
}

impl Category {
    /// Category named by the rename table, sorted.
    pub fn new(dataset: &str, source: FieldSource) -> Self {
        Self {
            dataset: dataset.to_string(),
            field: category_field(dataset).to_string(),
            source,
            order: ValueOrder::Sorted,
        }
    }

    /// Category whose values come from the column named like its field.
    pub fn column(dataset: &str) -> Self {
        let field = category_field(dataset).to_string();
        Self::new(dataset, FieldSource::Column(field))
    }

    pub fn with_field(mut self, field: &str) -> Self {
        self.field = field.to_string();
        self
    }

    pub fn with_order(mut self, order: ValueOrder) -> Self {
        self.order = order;
        self
    }
}

/// Records that can supply category values.
pub trait CategorySource {
    /// Present values for `source`; absent and empty values are skipped.
    fn values(&self, source: &FieldSource) -> Vec<&str>;
}

impl CategorySource for RepairRecord {
    fn values(&self, source: &FieldSource) -> Vec<&str> {
        match source {
            FieldSource::Column(column) => present(self.scalar(column)).into_iter().collect(),
            FieldSource::List(name) => self
                .list(name)
                .unwrap_or_default()
                .iter()
                .filter_map(|value| present(Some(value.as_str())))
                .collect(),
        }
    }
}

impl CategorySource for SelectedRecord {
    fn values(&self, source: &FieldSource) -> Vec<&str> {
        match source {
            FieldSource::Column(column) => present(self.get(column)).into_iter().collect(),
            FieldSource::List(_) => Vec::new(),
        }
    }
}

impl CategorySource for RawRecord {
    fn values(&self, source: &FieldSource) -> Vec<&str> {
        match source {
            FieldSource::Column(column) => self.field(column).value().into_iter().collect(),
            FieldSource::List(prefix) => {
                let mut indexed: Vec<(usize, &str)> = self
                    .iter()
                    .filter_map(|(column, value)| {
                        let index = column
                            .strip_prefix(prefix.as_str())
                            .filter(|suffix| suffix.bytes().all(|b| b.is_ascii_digit()))?
                            .parse::<usize>()
                            .ok()?;
                        present(Some(value)).map(|value| (index, value))
                    })
                    .collect();
                indexed.sort_by_key(|(index, _)| *index);
                indexed.into_iter().map(|(_, value)| value).collect()
            }
        }
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    FieldValue::from_option(value).value()
}

/// Builds reference datasets from records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetExtractor {
    categories: Vec<Category>,
}

impl DatasetExtractor {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// The six reference sets derived from the repair list.
    pub fn repair_list() -> Self {
        Self::new(vec![
            Category::new(columns::AVARIAS, FieldSource::List(columns::AVARIAS.to_string())),
            Category::new(columns::EXTRAS, FieldSource::List(columns::EXTRAS.to_string())),
            Category::column("Clientes"),
            Category::column("Maquinas"),
            Category::column("Tipos"),
            Category::column("ModelosElectrex"),
        ])
    }

    /// The circuit catalogue, `tblCI`.
    pub fn circuits() -> Self {
        Self::new(vec![
            Category::new("CI", FieldSource::Column("Circuito".to_string())).with_field("Circuito"),
        ])
    }

    /// The client catalogue, `tblClientes`.
    pub fn clients() -> Self {
        Self::new(vec![Category::column("Clientes")])
    }

    /// The defect catalogue: the numbered `Avarias` columns of one row.
    pub fn defects() -> Self {
        Self::new(vec![
            Category::new("Avarias", FieldSource::List("Avarias".to_string()))
                .with_order(ValueOrder::FirstSeen),
        ])
    }

    /// A lookup table `tbl{field}` keyed by its own column.
    pub fn lookup(field: &str) -> Self {
        Self::new(vec![Category::column(field)])
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Extracts every category from `records`.
    ///
    /// Records of different types can be mixed by passing
    /// `&dyn CategorySource` items.
    pub fn extract<'r, I, R>(&self, records: I, index: &mut DedupIndex) -> Vec<ReferenceDataset>
    where
        I: IntoIterator<Item = &'r R>,
        R: CategorySource + ?Sized + 'r,
    {
        for record in records {
            for category in &self.categories {
                for value in record.values(&category.source) {
                    index.put(&category.dataset, value);
                }
            }
        }

        self.categories
            .iter()
            .map(|category| {
                let mut values = index.representatives(&category.dataset).to_vec();
                if category.order == ValueOrder::Sorted {
                    values.sort();
                }
                debug!(
                    dataset = %category.dataset,
                    values = values.len(),
                    duplicates = index.category_duplicate_count(&category.dataset),
                    "reference dataset extracted"
                );
                ReferenceDataset::from_values(&category.dataset, &category.field, values)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migrate_model::{DateField, OrderNumber};

    fn repair(cliente: Option<&str>, avarias: &[&str]) -> RepairRecord {
        RepairRecord {
            maquina: None,
            num_maquina: None,
            marca: None,
            ordem_reparacao: OrderNumber::Value(1),
            actualizada: None,
            observacoes: None,
            data_time: DateField::NotApplicable,
            acessorios: None,
            tipo: None,
            modelo_electrex: None,
            int_ext: None,
            utilizador: None,
            cliente: cliente.map(str::to_string),
            avarias: (!avarias.is_empty())
                .then(|| avarias.iter().map(ToString::to_string).collect()),
            extras: None,
        }
    }

    #[test]
    fn test_rename_table() {
        assert_eq!(category_field("Avarias"), "Avaria");
        assert_eq!(category_field("ModelosElectrex"), "ModeloElectrex");
        assert_eq!(category_field("Marca"), "Marca");
    }

    #[test]
    fn test_repair_list_datasets() {
        let records = vec![
            repair(Some("Zeta Lda"), &["Motor Avariado", "Cabo"]),
            repair(Some("Alfa"), &["MOTOR AVARIADO ", "Bateria"]),
            repair(None, &[]),
        ];
        let mut index = DedupIndex::new();
        let datasets = DatasetExtractor::repair_list().extract(&records, &mut index);

        let names: Vec<&str> = datasets.iter().map(|d| d.dataset.as_str()).collect();
        assert_eq!(
            names,
            vec!["Avarias", "Extras", "Clientes", "Maquinas", "Tipos", "ModelosElectrex"]
        );
        assert_eq!(datasets[0].value_strs(), vec!["Bateria", "Cabo", "Motor Avariado"]);
        assert_eq!(datasets[0].field, "Avaria");
        assert_eq!(datasets[2].value_strs(), vec!["Alfa", "Zeta Lda"]);
        assert!(datasets[1].is_empty());
        assert_eq!(index.category_duplicate_count("Avarias"), 1);
    }

    #[test]
    fn test_mixed_sources() {
        let catalogue = vec![RawRecord::from_pairs([("ID", "1"), ("Circuito", "C-2")])];
        let mut listed = SelectedRecord::new();
        listed.set("Circuito", Some("c-2".to_string()));
        let mut other = SelectedRecord::new();
        other.set("Circuito", Some("C-1".to_string()));
        let list = vec![listed, other];

        let sources: Vec<&dyn CategorySource> = catalogue
            .iter()
            .map(|r| r as &dyn CategorySource)
            .chain(list.iter().map(|r| r as &dyn CategorySource))
            .collect();
        let mut index = DedupIndex::new();
        let datasets = DatasetExtractor::circuits().extract(sources, &mut index);

        assert_eq!(datasets[0].file_name(), "tblCI.json");
        assert_eq!(datasets[0].field, "Circuito");
        assert_eq!(datasets[0].value_strs(), vec!["C-1", "C-2"]);
        assert_eq!(index.duplicate_count(), 1);
    }

    #[test]
    fn test_defects_keep_index_order() {
        let row = RawRecord::from_pairs([
            ("ID", "1"),
            ("Avarias10", "Escovas"),
            ("Avarias2", "Motor"),
            ("Avarias1", "Cabo"),
            ("Avarias3", ""),
            ("Avarias4", "CABO"),
        ]);
        let mut index = DedupIndex::new();
        let datasets = DatasetExtractor::defects().extract(Some(&row), &mut index);
        assert_eq!(datasets[0].value_strs(), vec!["Cabo", "Motor", "Escovas"]);
        assert_eq!(datasets[0].file_name(), "tblAvarias.json");
    }

    #[test]
    fn test_no_duplicate_identities_in_output() {
        let records = vec![
            repair(Some("João"), &[]),
            repair(Some("JOAO"), &[]),
            repair(Some("joão."), &[]),
        ];
        let mut index = DedupIndex::new();
        let datasets = DatasetExtractor::clients().extract(&records, &mut index);
        assert_eq!(datasets[0].value_strs(), vec!["João"]);
        assert_eq!(index.duplicate_count(), 2);
    }
}
