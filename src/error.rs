//! Controller-boundary error types

use std::fmt;

use thiserror::Error;

use crate::export::ExportError;
use crate::loot::FormulaError;

/// Which of an item's formulas failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormulaRole {
    Quantity,
    Value,
}

impl fmt::Display for FormulaRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormulaRole::Quantity => f.write_str("quantity"),
            FormulaRole::Value => f.write_str("value"),
        }
    }
}

/// Preconditions a user action did not meet
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Roll count must be between 1 and {max}, got {count}.")]
    RollCount { count: u32, max: u32 },

    #[error("Please select at least one loot list.")]
    NoSelection,

    #[error("The \"{0}\" list has no items.")]
    EmptyTable(String),

    #[error("Quantity {quantity} for \"{item}\" is out of range (1-{max}).")]
    QuantityOutOfRange { item: String, quantity: u64, max: u64 },

    #[error("No results to export. Generate some loot first!")]
    NothingToExport,
}

/// Any failure surfaced by the session controller
#[derive(Debug, Error)]
pub enum LootError {
    #[error("Error rolling {role} for \"{item}\": {source}")]
    Formula {
        item: String,
        role: FormulaRole,
        #[source]
        source: FormulaError,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to export results: {0}")]
    Export(#[from] ExportError),
}
