//! lootgen - Shadowrun loot generator
//!
//! Pick loot tables, roll batches of random drops with dice-formula
//! quantities and values, rearrange the results and export them as text.

pub mod config;
pub mod error;
pub mod export;
pub mod loot;
pub mod random;
pub mod session;
pub mod shell;

use tracing::info;

pub use config::Config;
pub use error::{FormulaRole, LootError, ValidationError};
pub use session::{Controller, Direction, Session, SessionView};

use export::DirectorySink;
use loot::Catalog;
use random::{RandomSource, RngSource};

/// Load the configured catalog
pub fn load_catalog(config: &Config) -> Catalog {
    match &config.tables_path {
        Some(path) => Catalog::from_path(path),
        None => Catalog::bundled(),
    }
}

/// Build a controller from configuration
pub fn build_controller(config: &Config) -> Controller {
    let catalog = load_catalog(config);

    let rng: Box<dyn RandomSource> = match config.seed {
        Some(seed) => {
            info!("Using fixed seed {}", seed);
            Box::new(RngSource::seeded(seed))
        }
        None => Box::new(RngSource::thread()),
    };
    let sink = Box::new(DirectorySink::new(&config.export_dir));

    Controller::new(catalog, rng, sink)
        .with_export_config(config.export.clone())
        .with_selection(&config.default_selection)
}
