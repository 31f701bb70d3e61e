use std::process::ExitCode;

use clap::Parser;
use log::{error, info, warn};

use tintnotes::{App, Cli, Config, FileStore, LoadStatus, NoteStore};

pub fn initialize_logger(verbose: bool) {
    let default_filter = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_secs()
        .format_module_path(true)
        .init();

    info!("Logger initialized");
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    initialize_logger(cli.verbose);

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let mut config = match Config::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    let backend = FileStore::new(&config.data_dir);
    info!("Using notes file {}", backend.slot_path(&config.slot).display());
    let store = NoteStore::open_with_key(backend, config.slot.clone());
    if let LoadStatus::Recovered(reason) = store.load_status() {
        warn!("Started with an empty note list: {}", reason);
    }

    let mut app = App::new(store, config, config_path, cli.verbose);
    match app.run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
