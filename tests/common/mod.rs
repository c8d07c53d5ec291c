//! Common test utilities - LootTest harness for end-to-end testing

use std::fs;
use std::path::PathBuf;

use lootgen::export::DirectorySink;
use lootgen::loot::{Catalog, LootItem, LootTable};
use lootgen::random::RngSource;
use lootgen::Controller;
use tempfile::TempDir;

/// Test harness: a controller whose exports land in a private temp directory
pub struct LootTest {
    pub controller: Controller,
    dir: TempDir,
}

impl LootTest {
    /// Start a seeded session over the given tables with all of them selected
    pub fn with_tables(tables: Vec<LootTable>) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let ids: Vec<String> = tables.iter().map(|t| t.id.clone()).collect();

        let controller = Controller::new(
            Catalog::new(tables),
            Box::new(RngSource::seeded(1234)),
            Box::new(DirectorySink::new(dir.path())),
        )
        .with_selection(ids);

        Self { controller, dir }
    }

    /// Start a session over the bundled catalog with nothing selected
    pub fn bundled() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let controller = Controller::new(
            Catalog::bundled(),
            Box::new(RngSource::seeded(1234)),
            Box::new(DirectorySink::new(dir.path())),
        );
        Self { controller, dir }
    }

    /// Files written so far
    pub fn exported_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = fs::read_dir(self.dir.path())
            .expect("Failed to read export dir")
            .filter_map(|e| e.ok().map(|e| e.path()))
            .collect();
        files.sort();
        files
    }

    /// Ids of the current results, in order
    pub fn result_ids(&self) -> Vec<String> {
        self.controller
            .session()
            .results()
            .iter()
            .map(|r| r.id.clone())
            .collect()
    }
}

/// The single-item weapons table used throughout the scenarios
pub fn pistol_table() -> LootTable {
    LootTable::new(
        "w",
        "Weapons",
        vec![LootItem::new("Pistol", "1d4", "1d6x50")],
    )
}
