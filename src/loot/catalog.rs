//! Loot table catalog loading
//!
//! Tables come from a JSON array, either the bundled data file or a path from
//! the configuration. Malformed tables and items are skipped with a warning.
//! When nothing usable is left, the catalog falls back to the built-in table
//! set and carries an advisory for the user.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use super::formula::parse_formula;
use super::table::{fallback_tables, LootItem, LootTable};

/// Table data shipped with the crate
pub const BUNDLED_TABLES: &str = include_str!("../../data/loot_tables.json");

/// Shown when the data is not a non-empty list of tables
pub const FALLBACK_NOTICE: &str = "Using default loot lists. Custom data could not be loaded.";

/// Shown when the data could not be read or parsed at all
pub const LOAD_ERROR_NOTICE: &str = "Error loading loot lists. Using default data.";

#[derive(Debug, Deserialize)]
struct RawTable {
    id: Option<String>,
    name: Option<String>,
    #[serde(default)]
    items: Vec<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawItem {
    name: Option<String>,
    quantity_formula: Option<String>,
    value_formula: Option<String>,
}

/// The loaded set of loot tables
#[derive(Debug, Clone)]
pub struct Catalog {
    tables: Vec<LootTable>,
    advisory: Option<String>,
}

impl Catalog {
    /// Build a catalog from tables that are already validated
    pub fn new(tables: Vec<LootTable>) -> Self {
        Self {
            tables,
            advisory: None,
        }
    }

    /// The built-in table set with a notice explaining why it is in use
    pub fn fallback(notice: &str) -> Self {
        Self {
            tables: fallback_tables(),
            advisory: Some(notice.to_string()),
        }
    }

    /// Load the table data shipped with the crate
    pub fn bundled() -> Self {
        Self::from_json_str(BUNDLED_TABLES)
    }

    /// Load tables from a JSON file
    pub fn from_path(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => {
                info!("Loading loot tables from {}", path.display());
                Self::from_json_str(&text)
            }
            Err(e) => {
                warn!("Failed to read loot tables from {}: {}", path.display(), e);
                Self::fallback(LOAD_ERROR_NOTICE)
            }
        }
    }

    /// Load tables from JSON text
    pub fn from_json_str(text: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(value) => Self::from_value(value),
            Err(e) => {
                warn!("Loot table data is not valid JSON: {}", e);
                Self::fallback(LOAD_ERROR_NOTICE)
            }
        }
    }

    /// Load tables from an already parsed JSON document
    pub fn from_value(value: Value) -> Self {
        let raw_tables = match value {
            Value::Array(raw) if !raw.is_empty() => raw,
            _ => {
                warn!("Invalid loot lists data, using fallback");
                return Self::fallback(FALLBACK_NOTICE);
            }
        };

        let mut seen = HashSet::new();
        let mut tables = Vec::with_capacity(raw_tables.len());

        for (index, raw) in raw_tables.into_iter().enumerate() {
            let Some(table) = parse_table(index, raw) else {
                continue;
            };
            if !seen.insert(table.id.clone()) {
                warn!("Skipping duplicate loot table id {:?}", table.id);
                continue;
            }
            tables.push(table);
        }

        if tables.is_empty() {
            warn!("No usable loot tables in data, using fallback");
            return Self::fallback(FALLBACK_NOTICE);
        }

        info!("Loaded {} loot tables", tables.len());
        Self::new(tables)
    }

    /// All tables in display order
    pub fn tables(&self) -> &[LootTable] {
        &self.tables
    }

    /// Look up a table by id
    pub fn get(&self, id: &str) -> Option<&LootTable> {
        self.tables.iter().find(|t| t.id == id)
    }

    /// Notice for the user if the catalog is not what was configured
    pub fn advisory(&self) -> Option<&str> {
        self.advisory.as_deref()
    }

    /// Split into tables and advisory
    pub fn into_parts(self) -> (Vec<LootTable>, Option<String>) {
        (self.tables, self.advisory)
    }
}

fn non_blank(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.trim().is_empty())
}

fn parse_table(index: usize, raw: Value) -> Option<LootTable> {
    let raw: RawTable = match serde_json::from_value(raw) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Skipping malformed loot table at index {}: {}", index, e);
            return None;
        }
    };

    let (Some(id), Some(name)) = (non_blank(raw.id), non_blank(raw.name)) else {
        warn!("Skipping loot table at index {}: missing id or name", index);
        return None;
    };

    let items = raw
        .items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| parse_item(&id, i, item))
        .collect();

    Some(LootTable { id, name, items })
}

fn parse_item(table_id: &str, index: usize, raw: Value) -> Option<LootItem> {
    let raw: RawItem = match serde_json::from_value(raw) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Skipping malformed item {} in {:?}: {}", index, table_id, e);
            return None;
        }
    };

    let (Some(name), Some(quantity_formula), Some(value_formula)) = (
        non_blank(raw.name),
        non_blank(raw.quantity_formula),
        non_blank(raw.value_formula),
    ) else {
        warn!("Skipping item {} in {:?}: missing fields", index, table_id);
        return None;
    };

    for formula in [&quantity_formula, &value_formula] {
        if let Err(e) = parse_formula(formula) {
            warn!("Skipping item {:?} in {:?}: {}", name, table_id, e);
            return None;
        }
    }

    Some(LootItem {
        name,
        quantity_formula,
        value_formula,
    })
}
