use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::db::open_at;
use crate::error::{Result, TimelinerError};
use crate::fmt;
use crate::reports;
use crate::settings::get_data_dir;

pub fn add(title: &str, task: &str, category: Option<&str>) -> Result<()> {
    let title = title.trim();
    let task = task.trim();
    if title.is_empty() || task.is_empty() {
        return Err(TimelinerError::Other(
            "title and task must not be empty".to_string(),
        ));
    }
    let category = category.map(str::trim).filter(|c| !c.is_empty());

    let conn = open_at(&get_data_dir().join("timeliner.db"))?;
    let inserted = conn.execute(
        "INSERT OR IGNORE INTO projects (title, task_name, category) VALUES (?1, ?2, ?3)",
        rusqlite::params![title, task, category],
    )?;
    if inserted == 0 {
        println!("Project already exists: {title} / {task}");
    } else {
        println!("Added project: {title}");
    }
    Ok(())
}

pub fn list(search: Option<&str>, category: Option<&str>) -> Result<()> {
    let conn = open_at(&get_data_dir().join("timeliner.db"))?;
    let projects = reports::list_projects(&conn, search, category)?;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Title", "Task", "Category", "Entries", "Span"]);
    for p in &projects {
        table.add_row(vec![
            Cell::new(p.project.id),
            Cell::new(&p.project.title),
            Cell::new(&p.project.task_name),
            Cell::new(p.project.category_label()),
            Cell::new(p.item_count),
            Cell::new(fmt::span(&p.span)),
        ]);
    }
    println!("Projects\n{table}");

    if search.is_none() && category.is_none() {
        let categories = reports::categories(&conn)?;
        if !categories.is_empty() {
            println!("Categories: {}", categories.join(", "));
        }
    }
    Ok(())
}

pub fn show(id: i64) -> Result<()> {
    let conn = open_at(&get_data_dir().join("timeliner.db"))?;
    let Some(project) = reports::get_project(&conn, id)? else {
        return Err(TimelinerError::UnknownProject(id));
    };
    let timeline = reports::timeline(&conn, id)?;

    println!("{} ({})", project.title.bold(), project.category_label());
    println!("Task: {}", project.task_name);
    let mut table = Table::new();
    table.set_header(vec!["Date", "Description"]);
    for item in &timeline {
        table.add_row(vec![Cell::new(&item.date), Cell::new(&item.description)]);
    }
    println!("{table}");
    Ok(())
}
