use crate::db::open_at;
use crate::error::Result;
use crate::importer;
use crate::parser;
use crate::settings::get_data_dir;

/// Sample rows covering the common import shapes: shared keys, a second
/// task under the same title, an uncategorized project and mixed date
/// formats. Fed through the real parse and commit pipeline.
const SAMPLE_CSV: &str = "\
title,task,category,date,description
Website Redesign,Design,Client Work,2026-01-05,Kickoff call and moodboards
Website Redesign,Design,Client Work,2026-01-12,Wireframes reviewed
Website Redesign,Build,Client Work,01/19/2026,Static pages scaffolded
Data Pipeline,ETL,Internal,2026-02-02,Schema drafted
Data Pipeline,ETL,Internal,February 9 2026,First load into staging
Conference Talk,Outline,,2026-02-16,Abstract submitted
";

pub fn run() -> Result<()> {
    let mut conn = open_at(&get_data_dir().join("timeliner.db"))?;
    let outcome = parser::parse_rows(SAMPLE_CSV.as_bytes())?;
    let summary = importer::commit_rows(&mut conn, &outcome.rows, "demo", None)?;
    println!(
        "Demo data loaded: {} projects, {} timeline items.",
        summary.projects_created, summary.items_created
    );
    println!("Try `timeliner projects list` or `timeliner projects show 1`.");
    Ok(())
}
