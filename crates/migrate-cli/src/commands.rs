use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use comfy_table::{Cell, Table};
use tracing::{debug, info, info_span, warn};

use migrate_cli::config::MigrationConfig;
use migrate_ingest::list_input_files;
use migrate_cli::pipeline::{PipelineContext, RunReport, run_groups};

use crate::cli::RunArgs;
use crate::summary::{apply_table_style, header_cell};

/// Loads the config, applies CLI overrides and runs the selected groups.
pub fn run_migration(config_path: Option<&Path>, args: &RunArgs) -> Result<RunReport> {
    let config = resolve_config(config_path, args)?;
    let groups = config
        .select_groups(&args.only)
        .context("select dataset groups")?;
    if groups.is_empty() {
        bail!("no dataset groups enabled");
    }
    let ctx = PipelineContext::from_config(&config).context("build pipeline context")?;

    let run_span = info_span!(
        "run",
        input_dir = %ctx.input_dir.display(),
        output_dir = %ctx.output_dir.display()
    );
    let _run_guard = run_span.enter();
    let start = Instant::now();
    info!(groups = groups.len(), "migration started");
    match list_input_files(&ctx.input_dir) {
        Ok(files) => debug!(files = files.len(), "input files discovered"),
        Err(error) => warn!(error = %error, "input directory not readable"),
    }

    let report = run_groups(&ctx, &groups);

    info!(
        groups = report.groups.len(),
        failed_groups = report.groups.iter().filter(|g| g.has_errors()).count(),
        duplicates = report.total_duplicates(),
        duration_ms = start.elapsed().as_millis(),
        "migration finished"
    );
    Ok(report)
}

/// Prints the enabled groups with their inputs and outputs.
pub fn run_groups_list(config_path: Option<&Path>) -> Result<()> {
    let config = MigrationConfig::load_or_default(config_path).context("load config")?;
    let reference_dir = config.reference_dir.clone();

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Group"),
        header_cell("Inputs"),
        header_cell("Outputs"),
    ]);
    apply_table_style(&mut table);
    for group in config.dataset_groups() {
        let outputs: Vec<String> = group
            .outputs(&reference_dir)
            .iter()
            .map(|path| path.display().to_string())
            .collect();
        table.add_row(vec![
            Cell::new(group.name()),
            Cell::new(group.inputs().join("\n")),
            Cell::new(outputs.join("\n")),
        ]);
    }
    println!("Input: {}", config.input_dir.display());
    println!("Output: {}", config.output_dir.display());
    println!("{table}");
    Ok(())
}

fn resolve_config(config_path: Option<&Path>, args: &RunArgs) -> Result<MigrationConfig> {
    let mut config = MigrationConfig::load_or_default(config_path).context("load config")?;
    if let Some(dir) = &args.input_dir {
        config.input_dir.clone_from(dir);
    }
    if let Some(dir) = &args.output_dir {
        config.output_dir.clone_from(dir);
    }
    if let Some(dir) = &args.diagnostics_dir {
        config.diagnostics_dir = Some(dir.clone());
    }
    Ok(config)
}
