pub mod backup;
pub mod demo;
pub mod import;
pub mod init;
pub mod projects;
pub mod status;
pub mod timeline;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "timeliner", about = "Project timeline tracker with bulk CSV import.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up timeliner: choose a data directory and initialize the database.
    Init {
        /// Path for timeliner data (default: ~/Documents/timeliner)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Manage projects.
    Projects {
        #[command(subcommand)]
        command: ProjectsCommands,
    },
    /// Manage timeline entries.
    Timeline {
        #[command(subcommand)]
        command: TimelineCommands,
    },
    /// Preview and commit CSV imports.
    Import {
        #[command(subcommand)]
        command: ImportCommands,
    },
    /// Show current database and summary statistics.
    Status,
    /// Back up the database.
    Backup {
        /// Output path (default: <data_dir>/backups/timeliner-YYYYMMDD-HHMMSS.db)
        #[arg(long)]
        output: Option<String>,
    },
    /// Load sample data to explore timeliner.
    Demo,
}

#[derive(Subcommand)]
pub enum ProjectsCommands {
    /// Add a new project.
    Add {
        /// Project title
        title: String,
        /// Task name, e.g. 'Main'
        #[arg(long)]
        task: String,
        /// Category (uncategorized when omitted)
        #[arg(long)]
        category: Option<String>,
    },
    /// List projects with entry counts and timeline spans.
    List {
        /// Case-insensitive search over titles, tasks, categories and descriptions
        #[arg(long)]
        search: Option<String>,
        /// Filter by category ('Uncategorized' matches projects without one)
        #[arg(long)]
        category: Option<String>,
    },
    /// Show one project and its timeline.
    Show {
        /// Project ID (shown in `timeliner projects list`)
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum TimelineCommands {
    /// Append a dated entry to a project's timeline.
    Add {
        /// Project ID
        project_id: i64,
        /// Entry date (flexible format, stored as YYYY-MM-DD)
        date: String,
        /// Entry description
        description: String,
    },
}

#[derive(Subcommand)]
pub enum ImportCommands {
    /// Parse a CSV file and show what would be imported.
    Preview {
        /// Path to CSV file
        file: String,
        /// Print parsed rows as JSON for a later `import commit --rows`
        #[arg(long)]
        json: bool,
    },
    /// Parse and commit a CSV file, or commit previously previewed rows.
    Commit {
        /// Path to CSV file
        file: Option<String>,
        /// Path to a JSON file of previewed rows (from `import preview --json`)
        #[arg(long)]
        rows: Option<String>,
    },
}
