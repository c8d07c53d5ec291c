//! Session state controller
//!
//! Owns the session and applies user actions to it. Every operation runs to
//! completion before observers see the new state, and a failed operation
//! leaves the session untouched apart from the advisory message.

use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use tracing::debug;

use super::state::Session;
use crate::config::ExportConfig;
use crate::error::{FormulaRole, LootError, ValidationError};
use crate::export::{self, ExportReceipt, ExportSink};
use crate::loot::{evaluate, parse_formula, Catalog, FormulaError, LootTable, ResultEntry};
use crate::random::RandomSource;

/// Most rolls a single pull may request
pub const MAX_ROLLS: u32 = 20;

/// Largest quantity a single result may have
pub const MAX_QUANTITY: u64 = 1000;

/// Direction to move a result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            other => Err(format!("unknown direction: {}", other)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => f.write_str("up"),
            Direction::Down => f.write_str("down"),
        }
    }
}

/// What observers and renderers see after each operation
#[derive(Debug, Clone, Copy)]
pub struct SessionView<'a> {
    pub session: &'a Session,
    pub advisory: Option<&'a str>,
}

type Observer = Box<dyn FnMut(&SessionView<'_>)>;

/// The session state controller
pub struct Controller {
    session: Session,
    rng: Box<dyn RandomSource>,
    sink: Box<dyn ExportSink>,
    export: ExportConfig,
    advisory: Option<String>,
    last_timestamp: i64,
    observers: Vec<Observer>,
}

impl Controller {
    /// Create a controller over a loaded catalog. The catalog's fallback
    /// notice, if any, becomes the initial advisory.
    pub fn new(
        catalog: Catalog,
        rng: Box<dyn RandomSource>,
        sink: Box<dyn ExportSink>,
    ) -> Self {
        let (tables, advisory) = catalog.into_parts();
        Self {
            session: Session::new(tables),
            rng,
            sink,
            export: ExportConfig::default(),
            advisory,
            last_timestamp: 0,
            observers: Vec::new(),
        }
    }

    /// Set the export document settings
    pub fn with_export_config(mut self, export: ExportConfig) -> Self {
        self.export = export;
        self
    }

    /// Start with the given tables selected. Unknown ids are ignored.
    pub fn with_selection<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for id in ids {
            let id = id.as_ref();
            if self.session.table(id).is_some() && !self.session.is_selected(id) {
                self.session.selected_table_ids.push(id.to_string());
            }
        }
        self
    }

    /// Register a callback invoked after every operation
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&SessionView<'_>) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Current advisory message, if any
    pub fn advisory(&self) -> Option<&str> {
        self.advisory.as_deref()
    }

    pub fn view(&self) -> SessionView<'_> {
        SessionView {
            session: &self.session,
            advisory: self.advisory.as_deref(),
        }
    }

    /// Clear the advisory message
    pub fn dismiss_advisory(&mut self) {
        self.advisory = None;
        self.notify();
    }

    /// Select a table if unselected, otherwise deselect it. Returns whether
    /// the table is selected afterwards. Unknown ids change nothing.
    pub fn toggle_table(&mut self, id: &str) -> bool {
        let selected = &mut self.session.selected_table_ids;
        let now_selected = if let Some(pos) = selected.iter().position(|s| s == id) {
            selected.remove(pos);
            false
        } else if self.session.tables.iter().any(|t| t.id == id) {
            selected.push(id.to_string());
            true
        } else {
            debug!("Ignoring toggle of unknown table {:?}", id);
            false
        };

        self.notify();
        now_selected
    }

    /// Generate `roll_count` results from the selected tables.
    ///
    /// The batch is all or nothing: if any roll fails, no result from this
    /// pull is kept. Returns the newly appended entries.
    pub fn pull(&mut self, roll_count: u32) -> Result<&[ResultEntry], LootError> {
        self.advisory = None;

        let batch = match self.roll_batch(roll_count) {
            Ok(batch) => batch,
            Err(e) => return Err(self.fail(e)),
        };

        let start = self.session.results.len();
        if let Some(last) = batch.last() {
            self.last_timestamp = last.timestamp;
        }
        debug!(
            "Pulled {} results from {} selected tables",
            batch.len(),
            self.session.selected_table_ids.len()
        );
        self.session.results.extend(batch);

        self.notify();
        Ok(&self.session.results[start..])
    }

    /// Swap the result at `index` with its neighbour. Returns false (and
    /// changes nothing) when the move would leave the list.
    pub fn reorder(&mut self, index: usize, direction: Direction) -> bool {
        let len = self.session.results.len();
        let target = match direction {
            Direction::Up if index > 0 && index < len => index - 1,
            Direction::Down if index + 1 < len => index + 1,
            _ => {
                self.notify();
                return false;
            }
        };

        self.session.results.swap(index, target);
        debug!("Moved result {} {} to {}", index, direction, target);
        self.notify();
        true
    }

    /// Remove the result at `index`, if there is one
    pub fn delete_at(&mut self, index: usize) -> Option<ResultEntry> {
        let removed = if index < self.session.results.len() {
            Some(self.session.results.remove(index))
        } else {
            debug!("Ignoring delete of missing result {}", index);
            None
        };

        self.notify();
        removed
    }

    /// Remove all results. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.session.results.len();
        self.session.results.clear();
        debug!("Cleared {} results", removed);
        self.notify();
        removed
    }

    /// Save the current results through the export sink
    pub fn export_results(&mut self) -> Result<ExportReceipt, LootError> {
        self.advisory = None;

        if self.session.results.is_empty() {
            return Err(self.fail(ValidationError::NothingToExport.into()));
        }

        match export::export_results(&self.session.results, &self.export, self.sink.as_mut()) {
            Ok(receipt) => {
                self.notify();
                Ok(receipt)
            }
            Err(e) => Err(self.fail(e.into())),
        }
    }

    /// Roll an arbitrary formula with the session's random source
    pub fn roll(&mut self, formula: &str) -> Result<u64, FormulaError> {
        evaluate(formula, self.rng.as_mut())
    }

    fn roll_batch(&mut self, roll_count: u32) -> Result<Vec<ResultEntry>, LootError> {
        if !(1..=MAX_ROLLS).contains(&roll_count) {
            return Err(ValidationError::RollCount {
                count: roll_count,
                max: MAX_ROLLS,
            }
            .into());
        }
        if !self.session.has_selection() {
            return Err(ValidationError::NoSelection.into());
        }

        let now = Utc::now().timestamp_millis();
        let mut timestamp = self.last_timestamp;
        let mut batch = Vec::with_capacity(roll_count as usize);

        for _ in 0..roll_count {
            timestamp = now.max(timestamp + 1);
            batch.push(roll_entry(&self.session, self.rng.as_mut(), timestamp)?);
        }

        Ok(batch)
    }

    fn fail(&mut self, err: LootError) -> LootError {
        debug!("Operation failed: {}", err);
        self.advisory = Some(err.to_string());
        self.notify();
        err
    }

    fn notify(&mut self) {
        let view = SessionView {
            session: &self.session,
            advisory: self.advisory.as_deref(),
        };
        for observer in &mut self.observers {
            observer(&view);
        }
    }
}

fn formula_error(item: &str, role: FormulaRole) -> impl FnOnce(FormulaError) -> LootError + '_ {
    move |source| LootError::Formula {
        item: item.to_string(),
        role,
        source,
    }
}

/// Generate one result from a random selected table
fn roll_entry(
    session: &Session,
    rng: &mut dyn RandomSource,
    timestamp: i64,
) -> Result<ResultEntry, LootError> {
    let selected: Vec<&LootTable> = session
        .selected_table_ids
        .iter()
        .filter_map(|id| session.table(id))
        .collect();
    if selected.is_empty() {
        return Err(ValidationError::NoSelection.into());
    }
    let table = selected[rng.pick_index(selected.len())];

    if table.is_empty() {
        return Err(ValidationError::EmptyTable(table.name.clone()).into());
    }
    let item = &table.items[rng.pick_index(table.items.len())];

    let quantity = evaluate(&item.quantity_formula, rng)
        .map_err(formula_error(&item.name, FormulaRole::Quantity))?;
    if !(1..=MAX_QUANTITY).contains(&quantity) {
        return Err(ValidationError::QuantityOutOfRange {
            item: item.name.clone(),
            quantity,
            max: MAX_QUANTITY,
        }
        .into());
    }

    let value = parse_formula(&item.value_formula)
        .map_err(formula_error(&item.name, FormulaRole::Value))?;
    let values = (0..quantity)
        .map(|_| value.roll(&mut *rng))
        .collect::<Result<Vec<_>, _>>()
        .map_err(formula_error(&item.name, FormulaRole::Value))?;

    Ok(ResultEntry::new(&item.name, &table.name, values, timestamp))
}
