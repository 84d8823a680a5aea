mod cli;
mod config;
mod reconcile;
mod report;
mod secrets;
mod utils;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            env_file,
            all_sections,
            no_notify,
            secret_id,
        } => reconcile::run_update(
            env_file.as_deref(),
            all_sections,
            no_notify,
            secret_id.as_deref(),
        ),
        Commands::Status { output } => reconcile::run_status(&output),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
