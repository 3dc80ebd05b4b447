use rusqlite::{Connection, OptionalExtension};

use crate::error::Result;
use crate::models::{ImportRecord, Project, TimelineItem};

pub struct ProjectSummary {
    pub project: Project,
    pub item_count: i64,
    /// Earliest and latest timeline dates, when any entries exist.
    pub span: Option<(String, String)>,
}

struct ProjectRow {
    summary: ProjectSummary,
    descriptions: String,
}

fn load_project_rows(conn: &Connection) -> Result<Vec<ProjectRow>> {
    let mut stmt = conn.prepare(
        "SELECT p.id, p.title, p.task_name, p.category,
                COUNT(t.id), MIN(t.date), MAX(t.date),
                COALESCE(GROUP_CONCAT(t.description, ' '), '')
         FROM projects p
         LEFT JOIN timeline_items t ON t.project_id = p.id
         GROUP BY p.id
         ORDER BY p.id",
    )?;
    let rows = stmt.query_map([], |row| {
        let min: Option<String> = row.get(5)?;
        let max: Option<String> = row.get(6)?;
        Ok(ProjectRow {
            summary: ProjectSummary {
                project: Project {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    task_name: row.get(2)?,
                    category: row.get(3)?,
                },
                item_count: row.get(4)?,
                span: min.zip(max),
            },
            descriptions: row.get(7)?,
        })
    })?;
    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}

/// Projects with their timeline span and entry count, optionally filtered.
///
/// `search` is a case-insensitive substring match over title, category,
/// task and all timeline descriptions. `category` matches the display
/// label, so "Uncategorized" selects projects without one.
pub fn list_projects(
    conn: &Connection,
    search: Option<&str>,
    category: Option<&str>,
) -> Result<Vec<ProjectSummary>> {
    let needle = search.map(str::to_lowercase);
    let mut out = Vec::new();
    for row in load_project_rows(conn)? {
        let p = &row.summary.project;
        if let Some(cat) = category {
            if p.category_label() != cat {
                continue;
            }
        }
        if let Some(needle) = needle.as_deref() {
            let hay = format!(
                "{} {} {} {}",
                p.title,
                p.category.as_deref().unwrap_or(""),
                p.task_name,
                row.descriptions
            )
            .to_lowercase();
            if !hay.contains(needle) {
                continue;
            }
        }
        out.push(row.summary);
    }
    Ok(out)
}

/// Distinct category labels in use, sorted.
pub fn categories(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt =
        conn.prepare("SELECT DISTINCT ifnull(category, 'Uncategorized') FROM projects ORDER BY 1")?;
    let rows = stmt.query_map([], |row| row.get(0))?;
    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}

pub fn get_project(conn: &Connection, id: i64) -> Result<Option<Project>> {
    let project = conn
        .query_row(
            "SELECT id, title, task_name, category FROM projects WHERE id = ?1",
            [id],
            |row| {
                Ok(Project {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    task_name: row.get(2)?,
                    category: row.get(3)?,
                })
            },
        )
        .optional()?;
    Ok(project)
}

/// A project's timeline sorted by date; insertion order breaks ties.
pub fn timeline(conn: &Connection, project_id: i64) -> Result<Vec<TimelineItem>> {
    let mut stmt = conn.prepare(
        "SELECT id, project_id, date, description FROM timeline_items \
         WHERE project_id = ?1 ORDER BY date, id",
    )?;
    let rows = stmt.query_map([project_id], |row| {
        Ok(TimelineItem {
            id: row.get(0)?,
            project_id: row.get(1)?,
            date: row.get(2)?,
            description: row.get(3)?,
        })
    })?;
    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}

pub fn last_import(conn: &Connection) -> Result<Option<ImportRecord>> {
    let record = conn
        .query_row(
            "SELECT id, source, row_count, projects_created, items_created, \
             date_range_start, date_range_end, checksum \
             FROM imports ORDER BY id DESC LIMIT 1",
            [],
            |row| {
                Ok(ImportRecord {
                    id: row.get(0)?,
                    source: row.get(1)?,
                    row_count: row.get(2)?,
                    projects_created: row.get(3)?,
                    items_created: row.get(4)?,
                    date_range_start: row.get(5)?,
                    date_range_end: row.get(6)?,
                    checksum: row.get(7)?,
                })
            },
        )
        .optional()?;
    Ok(record)
}
