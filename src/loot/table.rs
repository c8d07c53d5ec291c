//! Loot tables and their items

use serde::{Deserialize, Serialize};

/// A possible drop from a loot table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LootItem {
    /// Display name
    pub name: String,
    /// Formula for how many units drop
    pub quantity_formula: String,
    /// Formula for each unit's value in nuyen
    pub value_formula: String,
}

impl LootItem {
    pub fn new(
        name: impl Into<String>,
        quantity_formula: impl Into<String>,
        value_formula: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            quantity_formula: quantity_formula.into(),
            value_formula: value_formula.into(),
        }
    }
}

/// A named collection of possible loot items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootTable {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Possible drops, in display order
    pub items: Vec<LootItem>,
}

impl LootTable {
    pub fn new(id: impl Into<String>, name: impl Into<String>, items: Vec<LootItem>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            items,
        }
    }

    /// Check if the table has nothing to drop
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Built-in table set used when the configured catalog cannot be loaded
pub fn fallback_tables() -> Vec<LootTable> {
    vec![LootTable::new(
        "weapons",
        "Weapons",
        vec![
            LootItem::new("Pistol", "1d4", "1d6x50"),
            LootItem::new("Assault Rifle", "1d2", "2d6x100"),
        ],
    )]
}
