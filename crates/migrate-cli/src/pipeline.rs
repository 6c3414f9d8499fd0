//! Dataset group orchestration.
//!
//! Each group reads its required tables, transforms and sorts them, extracts
//! its reference datasets and writes everything. Groups are independent:
//! a missing or unreadable input aborts only its own group, before any of
//! its files are written. Writes within a group are attempted one by one and
//! reported per file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use migrate_ingest::{LoadedTable, ReadOptions, load_table};
use migrate_model::{FieldIssue, MigrationError, RawRecord, ReferenceDataset};
use migrate_normalize::{DedupIndex, DuplicatesReport};
use migrate_output::{OutputSet, WriteOutcome, write_json};
use migrate_transform::{
    CategorySource, DatasetExtractor, FieldSelection, RecordTransformer, RepairListTransformer,
    sort_by_date_desc,
};
use serde::Serialize;
use tracing::{debug, error, info, info_span, trace, warn};

use crate::config::MigrationConfig;
use crate::logging::redact_value;

/// Audit file written to the diagnostics directory.
pub const DUPLICATES_FILE: &str = "duplicates.json";

/// A unit of migration with its own inputs and outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetGroup {
    /// `tblRepairList` and the reference sets derived from it.
    RepairList,
    /// `tblCircuitoList` and the `tblCI` catalogue.
    Circuits,
    /// `tblClientes` merged with `tblCliente`.
    Clients,
    /// The `tblAvarias` defect catalogue.
    Defects,
    /// A single-column lookup table `tbl{field}`.
    Lookup(String),
}

impl DatasetGroup {
    /// Name used by `--only` and in reports.
    pub fn name(&self) -> &str {
        match self {
            Self::RepairList => "repair_list",
            Self::Circuits => "circuits",
            Self::Clients => "clients",
            Self::Defects => "defects",
            Self::Lookup(field) => field,
        }
    }

    /// Input tables, all required.
    pub fn inputs(&self) -> Vec<String> {
        match self {
            Self::RepairList => vec!["tblRepairList".to_string()],
            Self::Circuits => vec!["tblCircuitoList".to_string(), "tblCI".to_string()],
            Self::Clients => vec!["tblClientes".to_string(), "tblCliente".to_string()],
            Self::Defects => vec!["tblAvarias".to_string()],
            Self::Lookup(field) => vec![format!("tbl{field}")],
        }
    }

    /// Output files, relative to the output directory.
    pub fn outputs(&self, reference_dir: &Path) -> Vec<PathBuf> {
        match self {
            Self::RepairList => {
                let mut outputs = vec![PathBuf::from("tblRepairList.json")];
                outputs.extend(
                    DatasetExtractor::repair_list()
                        .categories()
                        .iter()
                        .map(|category| {
                            reference_dir.join(format!("tbl{}.json", category.dataset))
                        }),
                );
                outputs
            }
            Self::Circuits => vec![
                PathBuf::from("tblCircuitoList.json"),
                PathBuf::from("tblCI.json"),
            ],
            Self::Clients => vec![PathBuf::from("tblClientes.json")],
            Self::Defects => vec![PathBuf::from("tblAvarias.json")],
            Self::Lookup(field) => vec![PathBuf::from(format!("tbl{field}.json"))],
        }
    }
}

/// Directories and read options shared by every group of a run.
#[derive(Debug, Clone)]
pub struct PipelineContext {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub reference_dir: PathBuf,
    pub diagnostics_dir: Option<PathBuf>,
    pub read_options: ReadOptions,
}

impl PipelineContext {
    pub fn from_config(config: &MigrationConfig) -> Result<Self, crate::config::ConfigError> {
        Ok(Self {
            input_dir: config.input_dir.clone(),
            output_dir: config.output_dir.clone(),
            reference_dir: config.reference_output_dir(),
            diagnostics_dir: config.diagnostics_dir.clone(),
            read_options: config.read_options()?,
        })
    }

    fn load(&self, stem: &str) -> Result<LoadedTable, MigrationError> {
        let table = load_table(&self.input_dir, stem, &self.read_options)?;
        info!(table = stem, path = %table.path.display(), records = table.len(), "input loaded");
        Ok(table)
    }
}

#[derive(Debug)]
pub enum GroupStatus {
    Completed,
    /// A required input could not be read; nothing was written.
    Aborted(MigrationError),
}

#[derive(Debug)]
pub struct GroupReport {
    pub group: String,
    pub status: GroupStatus,
    /// Records in the group's main output.
    pub records: usize,
    pub outputs: Vec<WriteOutcome>,
    pub duplicates: DuplicatesReport,
    pub issues: Vec<FieldIssue>,
    pub duration: Duration,
}

impl GroupReport {
    pub fn is_aborted(&self) -> bool {
        matches!(self.status, GroupStatus::Aborted(_))
    }

    pub fn failed_writes(&self) -> usize {
        self.outputs.iter().filter(|outcome| !outcome.is_ok()).count()
    }

    pub fn has_errors(&self) -> bool {
        self.is_aborted() || self.failed_writes() > 0
    }
}

#[derive(Debug, Default)]
pub struct RunReport {
    pub groups: Vec<GroupReport>,
    /// The duplicates audit, when a diagnostics directory is configured.
    pub audit: Option<AuditOutcome>,
}

#[derive(Debug)]
pub struct AuditOutcome {
    pub path: PathBuf,
    pub error: Option<MigrationError>,
}

impl RunReport {
    pub fn has_errors(&self) -> bool {
        self.groups.iter().any(GroupReport::has_errors)
            || self
                .audit
                .as_ref()
                .is_some_and(|audit| audit.error.is_some())
    }

    pub fn total_duplicates(&self) -> usize {
        self.groups.iter().map(|group| group.duplicates.total).sum()
    }
}

/// Everything a group produced before writing.
struct PreparedGroup {
    records: usize,
    outputs: OutputSet,
    index: DedupIndex,
    issues: Vec<FieldIssue>,
}

impl PreparedGroup {
    fn new(records: usize, index: DedupIndex, issues: Vec<FieldIssue>) -> Self {
        Self {
            records,
            outputs: OutputSet::new(),
            index,
            issues,
        }
    }

    fn push_datasets(&mut self, dir: &Path, datasets: &[ReferenceDataset]) {
        for dataset in datasets {
            self.outputs.push(dir.join(dataset.file_name()), &dataset.values);
        }
    }
}

/// Runs groups one after another; a failed group does not stop the next.
pub fn run_groups(ctx: &PipelineContext, groups: &[DatasetGroup]) -> RunReport {
    let reports: Vec<GroupReport> = groups.iter().map(|group| run_group(ctx, group)).collect();
    let audit = ctx
        .diagnostics_dir
        .as_deref()
        .map(|dir| write_audit(dir, &reports));
    RunReport {
        groups: reports,
        audit,
    }
}

pub fn run_group(ctx: &PipelineContext, group: &DatasetGroup) -> GroupReport {
    let span = info_span!("group", group = %group.name());
    let _guard = span.enter();
    let start = Instant::now();

    let prepared = match prepare_group(ctx, group) {
        Ok(prepared) => prepared,
        Err(err) => {
            error!(error = %err, "group aborted");
            return GroupReport {
                group: group.name().to_string(),
                status: GroupStatus::Aborted(err),
                records: 0,
                outputs: Vec::new(),
                duplicates: DuplicatesReport::default(),
                issues: Vec::new(),
                duration: start.elapsed(),
            };
        }
    };

    log_duplicates(&prepared.index);
    let PreparedGroup {
        records,
        outputs,
        index,
        issues,
    } = prepared;
    let outcomes = outputs.write_all();
    let duration = start.elapsed();

    info!(
        records,
        outputs = outcomes.len(),
        failed_writes = outcomes.iter().filter(|o| !o.is_ok()).count(),
        duplicates = index.duplicate_count(),
        field_issues = issues.len(),
        duration_ms = duration.as_millis(),
        "group complete"
    );

    GroupReport {
        group: group.name().to_string(),
        status: GroupStatus::Completed,
        records,
        outputs: outcomes,
        duplicates: index.into_report(),
        issues,
        duration,
    }
}

fn prepare_group(
    ctx: &PipelineContext,
    group: &DatasetGroup,
) -> Result<PreparedGroup, MigrationError> {
    match group {
        DatasetGroup::RepairList => prepare_repair_list(ctx),
        DatasetGroup::Circuits => prepare_circuits(ctx),
        DatasetGroup::Clients => prepare_clients(ctx),
        DatasetGroup::Defects => prepare_defects(ctx),
        DatasetGroup::Lookup(field) => prepare_lookup(ctx, field),
    }
}

fn prepare_repair_list(ctx: &PipelineContext) -> Result<PreparedGroup, MigrationError> {
    let table = ctx.load("tblRepairList")?;

    let transform_start = Instant::now();
    let output = RepairListTransformer::default().transform_all(&table.rows);
    let mut records = output.records;
    sort_by_date_desc(&mut records);
    debug!(
        records = records.len(),
        field_issues = output.issues.len(),
        duration_ms = transform_start.elapsed().as_millis(),
        "repair list transformed"
    );

    let mut index = DedupIndex::new();
    let datasets = DatasetExtractor::repair_list().extract(&records, &mut index);

    let mut prepared = PreparedGroup::new(records.len(), index, output.issues);
    prepared
        .outputs
        .push(ctx.output_dir.join("tblRepairList.json"), &records);
    prepared.push_datasets(&ctx.reference_dir, &datasets);
    Ok(prepared)
}

fn prepare_circuits(ctx: &PipelineContext) -> Result<PreparedGroup, MigrationError> {
    let list_table = ctx.load("tblCircuitoList")?;
    let catalogue_table = ctx.load("tblCI")?;

    let output = FieldSelection::circuit_list().transform_all(&list_table.rows);
    let mut list = output.records;
    sort_by_date_desc(&mut list);

    // Catalogue entries first, then circuits only seen in the list.
    let sources: Vec<&dyn CategorySource> = catalogue_table
        .rows
        .iter()
        .map(|row| row as &dyn CategorySource)
        .chain(list.iter().map(|record| record as &dyn CategorySource))
        .collect();
    let mut index = DedupIndex::new();
    let datasets = DatasetExtractor::circuits().extract(sources, &mut index);

    let mut prepared = PreparedGroup::new(list.len(), index, output.issues);
    prepared
        .outputs
        .push(ctx.output_dir.join("tblCircuitoList.json"), &list);
    prepared.push_datasets(&ctx.output_dir, &datasets);
    Ok(prepared)
}

fn prepare_clients(ctx: &PipelineContext) -> Result<PreparedGroup, MigrationError> {
    let clientes = ctx.load("tblClientes")?;
    let cliente = ctx.load("tblCliente")?;
    let cliente = FieldSelection::without_id().transform_all(&cliente.rows);

    let sources: Vec<&dyn CategorySource> = clientes
        .rows
        .iter()
        .map(|row| row as &dyn CategorySource)
        .chain(cliente.records.iter().map(|record| record as &dyn CategorySource))
        .collect();
    let mut index = DedupIndex::new();
    let datasets = DatasetExtractor::clients().extract(sources, &mut index);

    let records = datasets.iter().map(ReferenceDataset::len).sum();
    let mut prepared = PreparedGroup::new(records, index, cliente.issues);
    prepared.push_datasets(&ctx.output_dir, &datasets);
    Ok(prepared)
}

fn prepare_defects(ctx: &PipelineContext) -> Result<PreparedGroup, MigrationError> {
    let table = ctx.load("tblAvarias")?;
    if table.len() > 1 {
        debug!(rows = table.len(), "defect catalogue read from the first row only");
    }

    let mut index = DedupIndex::new();
    let first: Option<&RawRecord> = table.rows.first();
    let datasets = DatasetExtractor::defects().extract(first, &mut index);

    let records = datasets.iter().map(ReferenceDataset::len).sum();
    let mut prepared = PreparedGroup::new(records, index, Vec::new());
    prepared.push_datasets(&ctx.output_dir, &datasets);
    Ok(prepared)
}

fn prepare_lookup(ctx: &PipelineContext, field: &str) -> Result<PreparedGroup, MigrationError> {
    let table = ctx.load(&format!("tbl{field}"))?;
    let selected = FieldSelection::without_id().transform_all(&table.rows);

    let mut index = DedupIndex::new();
    let datasets = DatasetExtractor::lookup(field).extract(&selected.records, &mut index);

    let records = datasets.iter().map(ReferenceDataset::len).sum();
    let mut prepared = PreparedGroup::new(records, index, selected.issues);
    prepared.push_datasets(&ctx.output_dir, &datasets);
    Ok(prepared)
}

fn log_duplicates(index: &DedupIndex) {
    for (category, entries) in index.duplicates() {
        info!(category, duplicates = entries.len(), "duplicate spellings collapsed");
        for entry in entries {
            trace!(
                category,
                value = redact_value(&entry.value),
                representative = redact_value(&entry.representative),
                "duplicate"
            );
        }
    }
}

#[derive(Serialize)]
struct Audit<'a> {
    total: usize,
    groups: BTreeMap<&'a str, &'a DuplicatesReport>,
}

fn write_audit(dir: &Path, reports: &[GroupReport]) -> AuditOutcome {
    let groups: BTreeMap<&str, &DuplicatesReport> = reports
        .iter()
        .filter(|report| !report.duplicates.is_empty())
        .map(|report| (report.group.as_str(), &report.duplicates))
        .collect();
    let audit = Audit {
        total: groups.values().map(|report| report.total).sum(),
        groups,
    };

    let path = dir.join(DUPLICATES_FILE);
    let error = match write_json(&path, &audit) {
        Ok(()) => {
            info!(path = %path.display(), duplicates = audit.total, "duplicates audit written");
            None
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "duplicates audit not written");
            Some(MigrationError::from(err))
        }
    };
    AuditOutcome { path, error }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_names_and_inputs() {
        assert_eq!(DatasetGroup::RepairList.name(), "repair_list");
        assert_eq!(
            DatasetGroup::Lookup("Marca".to_string()).inputs(),
            vec!["tblMarca"]
        );
        assert_eq!(
            DatasetGroup::Circuits.inputs(),
            vec!["tblCircuitoList", "tblCI"]
        );
    }

    #[test]
    fn test_repair_list_outputs() {
        let outputs = DatasetGroup::RepairList.outputs(Path::new("reference"));
        assert_eq!(outputs.len(), 7);
        assert_eq!(outputs[0], PathBuf::from("tblRepairList.json"));
        assert_eq!(outputs[6], PathBuf::from("reference/tblModelosElectrex.json"));
    }
}
