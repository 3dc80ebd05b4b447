use crate::db::get_connection;
use crate::error::Result;
use crate::fmt::format_bytes;
use crate::reports;
use crate::settings::get_data_dir;

pub fn run() -> Result<()> {
    let data_dir = get_data_dir();
    let db_path = data_dir.join("timeliner.db");

    println!("Data dir:   {}", data_dir.display());
    println!("Database:   {}", db_path.display());

    if db_path.exists() {
        let size = std::fs::metadata(&db_path)?.len();
        println!("DB size:    {}", format_bytes(size));

        let conn = get_connection(&db_path)?;
        let projects: i64 = conn.query_row("SELECT count(*) FROM projects", [], |r| r.get(0))?;
        let items: i64 = conn.query_row("SELECT count(*) FROM timeline_items", [], |r| r.get(0))?;
        let imports: i64 = conn.query_row("SELECT count(*) FROM imports", [], |r| r.get(0))?;

        println!();
        println!("Projects:        {projects}");
        println!("Timeline items:  {items}");
        println!("Imports:         {imports}");

        if let Some(last) = reports::last_import(&conn)? {
            println!(
                "Last import:     {} ({} rows, {} new projects, {} items)",
                last.source, last.row_count, last.projects_created, last.items_created
            );
        }
    } else {
        println!();
        println!("Database not found. Run `timeliner init` to set up.");
    }

    Ok(())
}
