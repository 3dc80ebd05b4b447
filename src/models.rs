use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct Project {
    pub id: i64,
    pub title: String,
    pub task_name: String,
    pub category: Option<String>,
}

impl Project {
    /// Display label for the optional category.
    pub fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or("Uncategorized")
    }
}

#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct TimelineItem {
    pub id: i64,
    pub project_id: i64,
    pub date: String,
    pub description: String,
}

/// Normalized candidate produced by the CSV parser and consumed by the
/// committer. Serializable so a preview can be committed later without
/// re-parsing the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedRow {
    pub title: String,
    pub task_name: String,
    #[serde(default)]
    pub category: Option<String>,
    pub date: String,
    pub description: String,
}

/// One rejected data row: 1-based index (the header is row 0) and the
/// reason it was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowError {
    pub row: usize,
    pub reason: String,
}

#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct ImportRecord {
    pub id: Option<i64>,
    pub source: String,
    pub row_count: i64,
    pub projects_created: i64,
    pub items_created: i64,
    pub date_range_start: Option<String>,
    pub date_range_end: Option<String>,
    pub checksum: Option<String>,
}
