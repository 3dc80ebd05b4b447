use std::path::Path;

use rusqlite::Connection;

use crate::error::Result;

pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS projects (
    id INTEGER PRIMARY KEY,
    title TEXT NOT NULL,
    task_name TEXT NOT NULL,
    category TEXT,
    created_at TEXT DEFAULT (datetime('now'))
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_projects_identity
    ON projects(title, task_name, ifnull(category, ''));

CREATE TABLE IF NOT EXISTS timeline_items (
    id INTEGER PRIMARY KEY,
    project_id INTEGER NOT NULL,
    date TEXT NOT NULL,
    description TEXT NOT NULL,
    created_at TEXT DEFAULT (datetime('now')),
    FOREIGN KEY (project_id) REFERENCES projects(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_timeline_project_date
    ON timeline_items(project_id, date);

CREATE TABLE IF NOT EXISTS imports (
    id INTEGER PRIMARY KEY,
    source TEXT NOT NULL,
    import_date TEXT DEFAULT (datetime('now')),
    row_count INTEGER,
    projects_created INTEGER,
    items_created INTEGER,
    date_range_start TEXT,
    date_range_end TEXT,
    checksum TEXT
);
";

pub fn get_connection(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

/// Open the database and make sure the schema exists. Commands go through
/// here so a fresh data directory works without a separate setup step.
pub fn open_at(db_path: &Path) -> Result<Connection> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let conn = get_connection(db_path)?;
    init_db(&conn)?;
    Ok(conn)
}
