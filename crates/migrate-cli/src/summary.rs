use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use migrate_cli::logging::redact_value;
use migrate_cli::pipeline::{GroupReport, GroupStatus, RunReport};
use migrate_model::FieldIssue;

/// Issue rows shown before the table is cut off.
const MAX_ISSUE_ROWS: usize = 50;

pub fn print_summary(report: &RunReport) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Group"),
        header_cell("Status"),
        header_cell("Records"),
        header_cell("Outputs"),
        header_cell("Duplicates"),
        header_cell("Field issues"),
        header_cell("Time"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    for column in 2..=6 {
        align_column(&mut table, column, CellAlignment::Right);
    }

    let mut total_records = 0usize;
    let mut total_duplicates = 0usize;
    let mut total_issues = 0usize;
    for group in &report.groups {
        total_records += group.records;
        total_duplicates += group.duplicates.total;
        total_issues += group.issues.len();
        table.add_row(vec![
            Cell::new(&group.group).add_attribute(Attribute::Bold),
            status_cell(group),
            Cell::new(group.records),
            outputs_cell(group),
            count_cell(group.duplicates.total, Color::Yellow),
            count_cell(group.issues.len(), Color::Yellow),
            dim_cell(format!("{} ms", group.duration.as_millis())),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(total_records).add_attribute(Attribute::Bold),
        dim_cell("-"),
        count_cell(total_duplicates, Color::Yellow).add_attribute(Attribute::Bold),
        count_cell(total_issues, Color::Yellow).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    println!("{table}");

    print_issue_table(report);
    print_errors(report);
}

fn print_issue_table(report: &RunReport) {
    let issues: Vec<_> = report
        .groups
        .iter()
        .flat_map(|group| group.issues.iter().map(move |issue| (&group.group, issue)))
        .collect();
    if issues.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Group"),
        header_cell("Row"),
        header_cell("Field"),
        header_cell("Kind"),
        header_cell("Value"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (group, issue) in issues.iter().take(MAX_ISSUE_ROWS) {
        table.add_row(vec![
            Cell::new(group),
            issue_row_cell(issue),
            Cell::new(&issue.field),
            Cell::new(issue.kind.as_str()).fg(Color::Yellow),
            Cell::new(redact_value(&issue.value)),
        ]);
    }
    println!();
    println!("Field issues:");
    println!("{table}");
    if issues.len() > MAX_ISSUE_ROWS {
        println!("... and {} more", issues.len() - MAX_ISSUE_ROWS);
    }
}

fn print_errors(report: &RunReport) {
    let mut errors = Vec::new();
    for group in &report.groups {
        if let GroupStatus::Aborted(error) = &group.status {
            errors.push(format!("{}: {error}", group.group));
        }
        for outcome in &group.outputs {
            if let Some(error) = outcome.error() {
                errors.push(format!("{}: {error}", group.group));
            }
        }
    }
    if let Some(audit) = &report.audit {
        match &audit.error {
            Some(error) => errors.push(format!("duplicates audit: {error}")),
            None => println!("Duplicates audit: {}", audit.path.display()),
        }
    }
    if !errors.is_empty() {
        eprintln!("Errors:");
        for error in &errors {
            eprintln!("- {error}");
        }
    }
}

fn status_cell(group: &GroupReport) -> Cell {
    match &group.status {
        GroupStatus::Aborted(_) => Cell::new("aborted")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        GroupStatus::Completed if group.failed_writes() > 0 => Cell::new("partial")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        GroupStatus::Completed => Cell::new("✓").fg(Color::Green),
    }
}

fn outputs_cell(group: &GroupReport) -> Cell {
    if group.outputs.is_empty() {
        return dim_cell("-");
    }
    let written = group.outputs.len() - group.failed_writes();
    let cell = Cell::new(format!("{written}/{}", group.outputs.len()));
    if written == group.outputs.len() {
        cell
    } else {
        cell.fg(Color::Red).add_attribute(Attribute::Bold)
    }
}

fn issue_row_cell(issue: &FieldIssue) -> Cell {
    Cell::new(issue.line())
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
