//! Binary entry point: resolve configuration, bring up logging and the SQLite
//! store, then drive the Ratatui event loop until the user exits.
use my_places::{logging, run_app, App, Catalog, Config, SqliteStore};

fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    logging::init(&config.log_path)?;

    let store = SqliteStore::open(&config.db_path)?;
    if config.seed_demo {
        store.seed_if_empty()?;
    }

    let catalog = Catalog::with_order(config.sort_key, config.ascending);
    let mut app = App::new(Box::new(store), catalog, config.star_count)?;
    run_app(&mut app)
}
