use anyhow::{Context, Result};
use std::path::Path;
use std::rc::Rc;

use budgetkeep::db::{KeyValueStore, SqliteStore, UnavailableStore};
use budgetkeep::{config, logging, run, session};

fn main() -> Result<()> {
    logging::init();

    let mut args: Vec<String> = std::env::args().collect();
    let config = config::Config::resolve(&mut args)?;
    let backend = open_backend(&config);
    let mut session = session::Session::open(backend);

    run::as_cli(&args, &mut session)
}

/// Open the on-disk store, or fall back to a session without storage so
/// the collections still load from their defaults.
fn open_backend(config: &config::Config) -> Rc<dyn KeyValueStore> {
    let Some(path) = config.db_path.as_deref() else {
        tracing::warn!(
            target: "budgetkeep",
            event = "store_unavailable",
            "Could not determine a data directory; changes will not be saved",
        );
        return Rc::new(UnavailableStore::new("no data directory"));
    };

    match open_sqlite(path, config.max_value_bytes) {
        Ok(store) => Rc::new(store),
        Err(err) => {
            tracing::warn!(
                target: "budgetkeep",
                event = "store_unavailable",
                error = ?err,
                "Could not open the database; changes will not be saved",
            );
            Rc::new(UnavailableStore::new(format!("{err:#}")))
        }
    }
}

fn open_sqlite(path: &Path, max_value_bytes: usize) -> Result<SqliteStore> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create data directory: {}", dir.display()))?;
    }
    SqliteStore::open(path, max_value_bytes)
}
