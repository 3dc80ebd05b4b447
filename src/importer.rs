use std::path::Path;

use rusqlite::{Connection, OptionalExtension, Transaction};
use sha2::{Digest, Sha256};

use crate::error::Result;
use crate::models::{ParsedRow, RowError};
use crate::parser::{self, ParseOutcome};

pub struct CommitSummary {
    pub projects_created: usize,
    pub items_created: usize,
}

pub struct ImportReport {
    pub rows: Vec<ParsedRow>,
    pub errors: Vec<RowError>,
    pub summary: CommitSummary,
}

pub fn compute_checksum(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

// ---------------------------------------------------------------------------
// Reconciliation
// ---------------------------------------------------------------------------

/// Exact lookup by the composite key. An absent category and an empty one
/// are the same key; the unique index on projects guarantees at most one
/// match.
fn find_project(tx: &Transaction, row: &ParsedRow) -> Result<Option<i64>> {
    let mut stmt = tx.prepare_cached(
        "SELECT id FROM projects WHERE title = ?1 AND task_name = ?2 AND ifnull(category, '') = ?3",
    )?;
    let id = stmt
        .query_row(
            rusqlite::params![row.title, row.task_name, row.category.as_deref().unwrap_or("")],
            |r| r.get(0),
        )
        .optional()?;
    Ok(id)
}

fn create_project(tx: &Transaction, row: &ParsedRow) -> Result<i64> {
    tx.execute(
        "INSERT INTO projects (title, task_name, category) VALUES (?1, ?2, ?3)",
        rusqlite::params![row.title, row.task_name, row.category],
    )?;
    Ok(tx.last_insert_rowid())
}

/// Commit parsed rows against the store in one transaction.
///
/// Rows are processed in input order. A row whose (title, task_name,
/// category) key matches an existing project reuses it; otherwise the
/// project is created and is visible to the remaining rows of the same
/// commit, so the created-projects count is per unique key. One timeline
/// item is appended per row. An audit record describing the batch is
/// written alongside. Any storage failure rolls the whole batch back.
pub fn commit_rows(
    conn: &mut Connection,
    rows: &[ParsedRow],
    source: &str,
    checksum: Option<&str>,
) -> Result<CommitSummary> {
    let tx = conn.transaction()?;
    let mut summary = CommitSummary {
        projects_created: 0,
        items_created: 0,
    };

    for row in rows {
        let project_id = match find_project(&tx, row)? {
            Some(id) => id,
            None => {
                summary.projects_created += 1;
                create_project(&tx, row)?
            }
        };
        tx.execute(
            "INSERT INTO timeline_items (project_id, date, description) VALUES (?1, ?2, ?3)",
            rusqlite::params![project_id, row.date, row.description],
        )?;
        summary.items_created += 1;
    }

    // ISO dates order lexically
    let min_date = rows.iter().map(|r| r.date.as_str()).min();
    let max_date = rows.iter().map(|r| r.date.as_str()).max();
    tx.execute(
        "INSERT INTO imports (source, row_count, projects_created, items_created, \
         date_range_start, date_range_end, checksum) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        rusqlite::params![
            source,
            rows.len() as i64,
            summary.projects_created as i64,
            summary.items_created as i64,
            min_date,
            max_date,
            checksum,
        ],
    )?;

    tx.commit()?;
    Ok(summary)
}

/// Read, parse and commit a CSV file in one step. Rows that fail
/// validation are returned, not committed.
pub fn import_file(conn: &mut Connection, file_path: &Path) -> Result<ImportReport> {
    let data = std::fs::read(file_path)?;
    let ParseOutcome { rows, errors } = parser::parse_rows(&data)?;
    let source = file_path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let checksum = compute_checksum(&data);
    let summary = commit_rows(conn, &rows, source, Some(&checksum))?;
    Ok(ImportReport {
        rows,
        errors,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_at;

    fn test_db() -> (tempfile::TempDir, Connection) {
        let dir = tempfile::tempdir().unwrap();
        let conn = open_at(&dir.path().join("test.db")).unwrap();
        (dir, conn)
    }

    fn row(title: &str, task: &str, category: Option<&str>, date: &str) -> ParsedRow {
        ParsedRow {
            title: title.to_string(),
            task_name: task.to_string(),
            category: category.map(str::to_string),
            date: date.to_string(),
            description: String::new(),
        }
    }

    fn counts(conn: &Connection) -> (i64, i64) {
        let projects: i64 = conn
            .query_row("SELECT count(*) FROM projects", [], |r| r.get(0))
            .unwrap();
        let items: i64 = conn
            .query_row("SELECT count(*) FROM timeline_items", [], |r| r.get(0))
            .unwrap();
        (projects, items)
    }

    #[test]
    fn test_same_key_rows_share_one_project() {
        let (_dir, mut conn) = test_db();
        let rows = vec![
            row("MyProj", "Main", None, "2026-02-01"),
            row("MyProj", "Main", None, "2026-02-02"),
        ];
        let summary = commit_rows(&mut conn, &rows, "test", None).unwrap();
        assert_eq!(summary.projects_created, 1);
        assert_eq!(summary.items_created, 2);
        assert_eq!(counts(&conn), (1, 2));
    }

    #[test]
    fn test_different_categories_split_projects() {
        let (_dir, mut conn) = test_db();
        let rows = vec![
            row("MyProj", "Main", Some("Work"), "2026-02-01"),
            row("MyProj", "Main", Some("Personal"), "2026-02-01"),
        ];
        let summary = commit_rows(&mut conn, &rows, "test", None).unwrap();
        assert_eq!(summary.projects_created, 2);
        assert_eq!(counts(&conn), (2, 2));
    }

    #[test]
    fn test_matches_projects_persisted_earlier() {
        let (_dir, mut conn) = test_db();
        let rows = vec![row("MyProj", "Main", None, "2026-02-01")];
        commit_rows(&mut conn, &rows, "first", None).unwrap();

        let rows = vec![
            row("MyProj", "Main", None, "2026-02-02"),
            row("MyProj", "Main", None, "2026-02-03"),
        ];
        let summary = commit_rows(&mut conn, &rows, "second", None).unwrap();
        assert_eq!(summary.projects_created, 0);
        assert_eq!(summary.items_created, 2);
        assert_eq!(counts(&conn), (1, 3));
    }

    #[test]
    fn test_absent_category_matches_stored_null() {
        let (_dir, mut conn) = test_db();
        conn.execute(
            "INSERT INTO projects (title, task_name, category) VALUES ('P', 'Main', NULL)",
            [],
        )
        .unwrap();
        let summary =
            commit_rows(&mut conn, &[row("P", "Main", None, "2026-01-01")], "t", None).unwrap();
        assert_eq!(summary.projects_created, 0);
        assert_eq!(counts(&conn), (1, 1));
    }

    #[test]
    fn test_commit_records_audit_row() {
        let (_dir, mut conn) = test_db();
        let rows = vec![
            row("A", "Main", None, "2026-03-05"),
            row("B", "Main", None, "2026-03-01"),
        ];
        commit_rows(&mut conn, &rows, "batch.csv", Some("abc123")).unwrap();
        let (source, count, start, end): (String, i64, String, String) = conn
            .query_row(
                "SELECT source, row_count, date_range_start, date_range_end FROM imports",
                [],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
            )
            .unwrap();
        assert_eq!(source, "batch.csv");
        assert_eq!(count, 2);
        assert_eq!(start, "2026-03-01");
        assert_eq!(end, "2026-03-05");
    }

    #[test]
    fn test_commit_is_all_or_nothing() {
        let (_dir, mut conn) = test_db();
        // Sabotage the audit table so the commit fails at the very end.
        conn.execute_batch("DROP TABLE imports;").unwrap();
        let rows = vec![row("P", "Main", None, "2026-01-01")];
        assert!(commit_rows(&mut conn, &rows, "t", None).is_err());
        assert_eq!(counts(&conn), (0, 0));
    }

    #[test]
    fn test_import_file_end_to_end() {
        let (dir, mut conn) = test_db();
        let path = dir.path().join("batch.csv");
        std::fs::write(
            &path,
            "title,task_name,category,date,description\n\
             MyProj,Main,,2026-02-01,Started\n\
             MyProj,Main,,02/02/2026,Second\n\
             ,Main,,2026-02-03,missing title\n",
        )
        .unwrap();
        let report = import_file(&mut conn, &path).unwrap();
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.summary.projects_created, 1);
        assert_eq!(report.summary.items_created, 2);
        let checksum: Option<String> = conn
            .query_row("SELECT checksum FROM imports", [], |r| r.get(0))
            .unwrap();
        assert_eq!(checksum, Some(compute_checksum(&std::fs::read(&path).unwrap())));
    }

    #[test]
    fn test_compute_checksum_is_stable() {
        assert_eq!(compute_checksum(b"abc"), compute_checksum(b"abc"));
        assert_ne!(compute_checksum(b"abc"), compute_checksum(b"abd"));
        assert_eq!(compute_checksum(b"abc").len(), 64);
    }
}
