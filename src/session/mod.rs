//! User session
//!
//! Tracks which loot tables are selected and the running list of generated
//! results, and exposes the actions a user can take on them:
//! - Table selection toggling
//! - Pulling a batch of random loot
//! - Reordering, deleting and clearing results
//! - Exporting results to a text file

mod controller;
mod state;

pub use controller::{Controller, Direction, SessionView, MAX_QUANTITY, MAX_ROLLS};
pub use state::Session;
