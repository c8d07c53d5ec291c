//! Session data

use serde::Serialize;

use crate::loot::{LootTable, ResultEntry};

/// Tables, selection and generated results for one user session
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub(super) tables: Vec<LootTable>,
    pub(super) selected_table_ids: Vec<String>,
    pub(super) results: Vec<ResultEntry>,
}

impl Session {
    pub fn new(tables: Vec<LootTable>) -> Self {
        Self {
            tables,
            selected_table_ids: Vec::new(),
            results: Vec::new(),
        }
    }

    /// All tables in display order
    pub fn tables(&self) -> &[LootTable] {
        &self.tables
    }

    /// Look up a table by id
    pub fn table(&self, id: &str) -> Option<&LootTable> {
        self.tables.iter().find(|t| t.id == id)
    }

    /// Selected table ids, in the order they were selected
    pub fn selected(&self) -> &[String] {
        &self.selected_table_ids
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected_table_ids.iter().any(|s| s == id)
    }

    /// Generated results in display order
    pub fn results(&self) -> &[ResultEntry] {
        &self.results
    }

    pub fn has_selection(&self) -> bool {
        !self.selected_table_ids.is_empty()
    }

    pub fn has_results(&self) -> bool {
        !self.results.is_empty()
    }

    /// Sum of quantities across all results
    pub fn total_items(&self) -> u64 {
        self.results.iter().map(|r| r.quantity).sum()
    }

    /// Sum of all unit values across all results, saturating at `u64::MAX`
    pub fn total_value(&self) -> u64 {
        self.results
            .iter()
            .fold(0, |acc: u64, r| acc.saturating_add(r.total_value()))
    }
}
