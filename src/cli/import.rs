use std::path::Path;

use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::db::open_at;
use crate::error::{Result, TimelinerError};
use crate::importer::{self, CommitSummary};
use crate::models::{ParsedRow, RowError};
use crate::parser;
use crate::settings::get_data_dir;

pub fn preview(file: &str, json: bool) -> Result<()> {
    let data = std::fs::read(file)?;
    let outcome = parser::parse_rows(&data)?;

    if json {
        // Rows on stdout for piping into `import commit --rows`
        println!("{}", serde_json::to_string_pretty(&outcome.rows)?);
        for e in &outcome.errors {
            eprintln!("row {}: {}", e.row, e.reason);
        }
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Title", "Task", "Category", "Date", "Description"]);
    for row in &outcome.rows {
        table.add_row(vec![
            Cell::new(&row.title),
            Cell::new(&row.task_name),
            Cell::new(row.category.as_deref().unwrap_or("")),
            Cell::new(&row.date),
            Cell::new(&row.description),
        ]);
    }
    println!("{} valid rows\n{table}", outcome.rows.len());
    print_row_errors(&outcome.errors);
    Ok(())
}

pub fn commit(file: Option<&str>, rows_file: Option<&str>) -> Result<()> {
    let mut conn = open_at(&get_data_dir().join("timeliner.db"))?;
    match (file, rows_file) {
        (Some(file), None) => {
            let report = importer::import_file(&mut conn, Path::new(file))?;
            println!(
                "{}: {} of {} data rows valid",
                file,
                report.rows.len(),
                report.rows.len() + report.errors.len()
            );
            print_row_errors(&report.errors);
            print_summary(&report.summary);
        }
        (None, Some(rows_file)) => {
            let data = std::fs::read(rows_file)?;
            let rows: Vec<ParsedRow> = serde_json::from_slice(&data)?;
            let source = Path::new(rows_file)
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("rows");
            let summary = importer::commit_rows(&mut conn, &rows, source, None)?;
            print_summary(&summary);
        }
        _ => {
            return Err(TimelinerError::Other(
                "pass exactly one of a CSV file or --rows <rows.json>".to_string(),
            ));
        }
    }
    Ok(())
}

fn print_row_errors(errors: &[RowError]) {
    if errors.is_empty() {
        return;
    }
    println!("{}", format!("{} rows skipped:", errors.len()).red());
    for e in errors {
        println!("  row {}: {}", e.row, e.reason);
    }
}

fn print_summary(summary: &CommitSummary) {
    println!(
        "{} projects created, {} timeline items created",
        summary.projects_created.to_string().green(),
        summary.items_created.to_string().green(),
    );
}
