//! Wide repair-list rows to typed [`RepairRecord`]s.

use std::collections::BTreeSet;

use migrate_model::record::columns;
use migrate_model::{DateField, FieldIssue, FieldValue, OrderNumber, RawRecord, RepairRecord};
use migrate_normalize::{canonical_timestamp, parse_integer};
use tracing::{debug, warn};

use crate::schema::RepairListSchema;

/// Records produced from one table, with the field-level issues found.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformOutput<T> {
    pub records: Vec<T>,
    pub issues: Vec<FieldIssue>,
}

impl<T> TransformOutput<T> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Turns raw rows of one table into output records.
///
/// Field-level failures never drop a row: the field is degraded and an
/// issue is pushed for the row.
pub trait RecordTransformer {
    type Output;

    fn transform(&self, row: usize, raw: &RawRecord, issues: &mut Vec<FieldIssue>)
    -> Self::Output;

    fn transform_all(&self, rows: &[RawRecord]) -> TransformOutput<Self::Output> {
        transform_rows(self, rows)
    }
}

/// Applies `transformer` to every row, collecting issues in row order.
pub fn transform_rows<T>(transformer: &T, rows: &[RawRecord]) -> TransformOutput<T::Output>
where
    T: RecordTransformer + ?Sized,
{
    let mut issues = Vec::new();
    let records = rows
        .iter()
        .enumerate()
        .map(|(row, raw)| transformer.transform(row, raw, &mut issues))
        .collect();
    TransformOutput { records, issues }
}

/// Transformer for `tblRepairList`.
#[derive(Debug, Clone, Default)]
pub struct RepairListTransformer {
    schema: RepairListSchema,
}

impl RepairListTransformer {
    pub fn new(schema: RepairListSchema) -> Self {
        Self { schema }
    }

    /// Source columns not read by the schema, across all rows.
    pub fn unmapped_columns<'a>(&self, rows: &'a [RawRecord]) -> BTreeSet<&'a str> {
        rows.iter()
            .flat_map(|row| self.schema.unmapped_columns(row))
            .collect()
    }
}

impl RecordTransformer for RepairListTransformer {
    type Output = RepairRecord;

    fn transform(&self, row: usize, raw: &RawRecord, issues: &mut Vec<FieldIssue>) -> RepairRecord {
        let scalar = |column: &str| raw.field(column).to_option();

        RepairRecord {
            maquina: scalar(columns::MAQUINA),
            num_maquina: scalar(columns::NUM_MAQUINA),
            marca: scalar(columns::MARCA),
            ordem_reparacao: order_number(row, raw.field(columns::ORDEM_REPARACAO), issues),
            actualizada: scalar(columns::ACTUALIZADA),
            observacoes: scalar(columns::OBSERVACOES),
            data_time: date_field(row, columns::DATA_TIME, raw.field(columns::DATA_TIME), issues),
            acessorios: scalar(columns::ACESSORIOS),
            tipo: scalar(columns::TIPO),
            modelo_electrex: scalar(columns::MODELO_ELECTREX),
            int_ext: scalar(columns::INT_EXT),
            utilizador: scalar(columns::UTILIZADOR),
            cliente: scalar(columns::CLIENTE),
            avarias: self.schema.avarias.collect(raw),
            extras: self.schema.extras.collect(raw),
        }
    }

    fn transform_all(&self, rows: &[RawRecord]) -> TransformOutput<RepairRecord> {
        let unmapped = self.unmapped_columns(rows);
        if !unmapped.is_empty() {
            debug!(columns = ?unmapped, "columns not used by the repair list schema");
        }
        transform_rows(self, rows)
    }
}

fn order_number(row: usize, value: FieldValue<'_>, issues: &mut Vec<FieldIssue>) -> OrderNumber {
    let raw = value.value().unwrap_or_default();
    match parse_integer(raw) {
        Ok(number) => OrderNumber::Value(number),
        Err(err) => {
            warn!(
                row = row + 1,
                field = columns::ORDEM_REPARACAO,
                "order number is not an integer"
            );
            issues.push(FieldIssue::numeric(row, columns::ORDEM_REPARACAO, err));
            OrderNumber::NotANumber
        }
    }
}

/// Three-state date: missing stays null, bad input is dropped from output.
pub(crate) fn date_field(
    row: usize,
    field: &str,
    value: FieldValue<'_>,
    issues: &mut Vec<FieldIssue>,
) -> DateField {
    let Some(raw) = value.value() else {
        return DateField::NotApplicable;
    };
    match canonical_timestamp(raw) {
        Ok(timestamp) => DateField::Value(timestamp),
        Err(err) => {
            warn!(row = row + 1, field, "invalid date, field omitted");
            issues.push(FieldIssue::invalid_date(row, field, err));
            DateField::Invalid
        }
    }
}
