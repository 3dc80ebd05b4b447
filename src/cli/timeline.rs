use crate::dates;
use crate::db::open_at;
use crate::error::{Result, TimelinerError};
use crate::settings::get_data_dir;

pub fn add(project_id: i64, date: &str, description: &str) -> Result<()> {
    let conn = open_at(&get_data_dir().join("timeliner.db"))?;
    let exists = conn
        .prepare("SELECT 1 FROM projects WHERE id = ?1")?
        .exists([project_id])?;
    if !exists {
        return Err(TimelinerError::UnknownProject(project_id));
    }
    let date = dates::parse_flexible(date)
        .ok_or_else(|| TimelinerError::InvalidDate(date.to_string()))?;
    let iso = dates::to_iso(date);
    conn.execute(
        "INSERT INTO timeline_items (project_id, date, description) VALUES (?1, ?2, ?3)",
        rusqlite::params![project_id, iso, description],
    )?;
    println!("Added timeline entry for project {project_id} on {iso}");
    Ok(())
}
