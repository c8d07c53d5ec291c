//! Loot data and generation primitives
//!
//! - Dice formulas (e.g., "1d6x50")
//! - Loot tables and items
//! - Catalog loading with a built-in fallback
//! - Generated result entries

mod catalog;
mod entry;
mod formula;
mod table;

pub use catalog::{Catalog, BUNDLED_TABLES, FALLBACK_NOTICE, LOAD_ERROR_NOTICE};
pub use entry::ResultEntry;
pub use formula::{evaluate, parse_formula, Formula, FormulaError, MAX_DICE};
pub use table::{fallback_tables, LootItem, LootTable};
