use color_eyre::{eyre::eyre, Result};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use todo_projects::{
    adapters::{
        cli::{build_cli, dispatch, Outcome},
        config::FileConfigStore,
        storage::{FileStorage, MemoryStorage},
    },
    ports::{ConfigStore, KeyValueStorage},
    ProjectStore,
};

const LOG_FILE_NAME: &str = "todo-projects.log";

fn main() -> Result<()> {
    // Initialize color-eyre for better error reporting
    color_eyre::install()?;

    let matches = build_cli().get_matches();

    // Load configuration, then let command line arguments override it
    let config_store = FileConfigStore::new()?;
    let mut config = config_store.load_config()?;

    if let Some(dir) = matches.get_one::<PathBuf>("data-dir") {
        config.data_dir = Some(dir.clone());
    }
    if let Some(key) = matches.get_one::<String>("key") {
        config.storage_key = key.clone();
    }

    let data_dir = config
        .data_dir
        .clone()
        .or_else(FileStorage::default_dir)
        .ok_or_else(|| eyre!("Cannot determine a data directory; pass --data-dir"))?;

    // Initialize logging to file
    std::fs::create_dir_all(&data_dir)?;
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(data_dir.join(LOG_FILE_NAME))?;

    let level = config.tracing_level();

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .with_max_level(*level.as_ref().unwrap_or(&tracing::Level::INFO))
        .init();

    if let Err(e) = &level {
        tracing::warn!("{}, logging at info", e);
        eprintln!("⚠️  {e}, logging at info");
    }

    let storage: Arc<dyn KeyValueStorage> = if matches.get_flag("ephemeral") {
        tracing::info!("Running with in-memory storage");
        Arc::new(MemoryStorage::new())
    } else {
        Arc::new(FileStorage::new(&data_dir))
    };

    let mut store = ProjectStore::open(storage, config.storage_key.clone())?;

    match dispatch(&matches, &mut store)? {
        Outcome::Printed(text) => print!("{text}"),
        Outcome::Failed(message) => {
            eprintln!("❌ {message}");
            std::process::exit(1);
        }
    }

    Ok(())
}
