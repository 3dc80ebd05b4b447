mod cli;
mod dates;
mod db;
mod error;
mod fmt;
mod importer;
mod models;
mod parser;
mod reports;
mod settings;

use clap::Parser;

use cli::{Cli, Commands, ImportCommands, ProjectsCommands, TimelineCommands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Projects { command } => match command {
            ProjectsCommands::Add {
                title,
                task,
                category,
            } => cli::projects::add(&title, &task, category.as_deref()),
            ProjectsCommands::List { search, category } => {
                cli::projects::list(search.as_deref(), category.as_deref())
            }
            ProjectsCommands::Show { id } => cli::projects::show(id),
        },
        Commands::Timeline { command } => match command {
            TimelineCommands::Add {
                project_id,
                date,
                description,
            } => cli::timeline::add(project_id, &date, &description),
        },
        Commands::Import { command } => match command {
            ImportCommands::Preview { file, json } => cli::import::preview(&file, json),
            ImportCommands::Commit { file, rows } => {
                cli::import::commit(file.as_deref(), rows.as_deref())
            }
        },
        Commands::Status => cli::status::run(),
        Commands::Backup { output } => cli::backup::run(output),
        Commands::Demo => cli::demo::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
