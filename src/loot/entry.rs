//! Generated loot results

use serde::{Deserialize, Serialize};

/// One generated drop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultEntry {
    /// Unique identifier assigned at creation
    pub id: String,
    /// Name of the item that dropped
    pub item_name: String,
    /// Name of the table it came from
    pub list_name: String,
    /// Number of units
    pub quantity: u64,
    /// Value of each unit, one per unit
    pub values: Vec<u64>,
    /// Creation time in milliseconds since the epoch
    pub timestamp: i64,
}

impl ResultEntry {
    /// Create an entry with a fresh id
    pub fn new(
        item_name: impl Into<String>,
        list_name: impl Into<String>,
        values: Vec<u64>,
        timestamp: i64,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            item_name: item_name.into(),
            list_name: list_name.into(),
            quantity: values.len() as u64,
            values,
            timestamp,
        }
    }

    /// Sum of all unit values, saturating at `u64::MAX`
    pub fn total_value(&self) -> u64 {
        self.values.iter().fold(0, |acc: u64, v| acc.saturating_add(*v))
    }

    /// Check that the entry carries everything an export needs
    pub fn is_well_formed(&self) -> bool {
        !self.item_name.trim().is_empty()
            && self.quantity >= 1
            && self.values.len() as u64 == self.quantity
    }
}
