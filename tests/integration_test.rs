//! End-to-end tests using the LootTest harness

mod common;

use std::fs;

use common::{pistol_table, LootTest};
use lootgen::loot::{Catalog, LootItem, LootTable, FALLBACK_NOTICE};
use lootgen::shell::{self, Command, Reply};
use lootgen::{Config, Direction, LootError, ValidationError};

#[test]
fn test_pistol_scenario() {
    let mut t = LootTest::with_tables(vec![pistol_table()]);

    let batch = t.controller.pull(1).expect("pull succeeds");
    assert_eq!(batch.len(), 1);
    let entry = &batch[0];
    assert_eq!(entry.item_name, "Pistol");
    assert!((1..=4).contains(&entry.quantity));
    assert_eq!(entry.values.len() as u64, entry.quantity);
    assert!(entry.values.iter().all(|v| (50..=300).contains(v)));
}

#[test]
fn test_empty_table_scenario() {
    let mut t = LootTest::with_tables(vec![LootTable::new("e", "Empty", vec![])]);

    let err = t.controller.pull(1).unwrap_err();
    assert!(err.to_string().contains("has no items"));
    assert!(!t.controller.session().has_results());
}

#[test]
fn test_pull_appends_exactly_k() {
    let mut t = LootTest::bundled();
    t.controller.toggle_table("goonpockets");
    t.controller.toggle_table("weapons");

    for k in [1, 5, 20] {
        let before = t.controller.session().results().len();
        let batch = t.controller.pull(k).expect("pull succeeds");
        assert_eq!(batch.len(), k as usize);
        for pair in batch.windows(2) {
            assert!(pair[0].timestamp <= pair[1].timestamp);
        }
        assert_eq!(t.controller.session().results().len(), before + k as usize);
    }

    for entry in t.controller.session().results() {
        assert_eq!(entry.values.len() as u64, entry.quantity);
        assert!(entry.list_name == "Goon Pockets" || entry.list_name == "Weapons");
    }
}

#[test]
fn test_pull_with_empty_selection_mutates_nothing() {
    let mut t = LootTest::bundled();
    let err = t.controller.pull(4).unwrap_err();
    assert!(matches!(
        err,
        LootError::Validation(ValidationError::NoSelection)
    ));
    assert!(!t.controller.session().has_results());
    assert!(t.controller.advisory().is_some());
}

#[test]
fn test_failed_pull_keeps_earlier_batches() {
    let mut t = LootTest::with_tables(vec![
        pistol_table(),
        LootTable::new("bad", "Bad", vec![LootItem::new("Glitch", "5000", "1")]),
    ]);
    t.controller.toggle_table("bad");
    t.controller.pull(3).unwrap();
    let before = t.result_ids();

    t.controller.toggle_table("w");
    t.controller.toggle_table("bad");
    assert!(t.controller.pull(2).is_err());
    assert_eq!(t.result_ids(), before);
}

#[test]
fn test_reorder_delete_clear() {
    let mut t = LootTest::with_tables(vec![pistol_table()]);
    t.controller.pull(4).unwrap();
    let original = t.result_ids();

    // up then down restores order
    assert!(t.controller.reorder(3, Direction::Up));
    assert!(t.controller.reorder(2, Direction::Down));
    assert_eq!(t.result_ids(), original);

    // boundaries are no-ops
    assert!(!t.controller.reorder(0, Direction::Up));
    assert!(!t.controller.reorder(3, Direction::Down));
    assert_eq!(t.result_ids(), original);

    assert!(t.controller.delete_at(0).is_some());
    assert_eq!(t.result_ids(), original[1..].to_vec());
    assert!(t.controller.delete_at(99).is_none());
    assert_eq!(t.result_ids().len(), 3);

    t.controller.clear();
    assert!(t.result_ids().is_empty());
}

#[test]
fn test_export_writes_document() {
    let mut t = LootTest::with_tables(vec![pistol_table()]);
    t.controller.pull(2).unwrap();
    let total = t.controller.session().total_items();

    let receipt = t.controller.export_results().expect("export succeeds");
    assert_eq!(receipt.entries, 2);
    assert_eq!(t.exported_files(), vec![receipt.path.clone()]);

    let text = fs::read_to_string(&receipt.path).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("Shadowrun Loot Generator Results"));
    assert!(lines.next().unwrap().starts_with("Generated: "));
    assert!(text.contains("1. Pistol x"));
    assert!(text.contains("2. Pistol x"));
    assert!(text.ends_with(&format!("Total Items: {}\n", total)));
    assert_eq!(text.matches('¥').count() as u64, total);
}

#[test]
fn test_export_without_results() {
    let mut t = LootTest::with_tables(vec![pistol_table()]);
    assert!(t.controller.export_results().is_err());
    assert!(t.exported_files().is_empty());
}

#[test]
fn test_catalog_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tables.json");
    fs::write(
        &path,
        r#"[{"id": "drones", "name": "Drones", "items": [
            {"name": "Fly-Spy", "quantityFormula": "1", "valueFormula": "2000"}
        ]}]"#,
    )
    .unwrap();

    let config = Config {
        tables_path: Some(path),
        export_dir: dir.path().to_path_buf(),
        default_selection: vec!["drones".into()],
        ..Config::default()
    };
    let mut controller = lootgen::build_controller(&config);
    assert!(controller.advisory().is_none());

    let batch = controller.pull(2).unwrap();
    assert!(batch
        .iter()
        .all(|e| e.item_name == "Fly-Spy" && e.values == vec![2000]));
}

#[test]
fn test_malformed_catalog_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tables.json");
    fs::write(&path, r#"{"tables": []}"#).unwrap();

    let config = Config {
        tables_path: Some(path),
        ..Config::default()
    };
    let controller = lootgen::build_controller(&config);
    assert_eq!(controller.advisory(), Some(FALLBACK_NOTICE));
    // goonpockets is not in the fallback set
    assert!(!controller.session().has_selection());
    assert_eq!(controller.session().tables()[0].name, "Weapons");
}

#[test]
fn test_seeded_sessions_repeat() {
    let config = Config {
        seed: Some(77),
        ..Config::default()
    };
    let mut a = lootgen::build_controller(&config);
    let mut b = lootgen::build_controller(&config);

    let first: Vec<_> = a
        .pull(10)
        .unwrap()
        .iter()
        .map(|e| (e.item_name.clone(), e.values.clone()))
        .collect();
    let second: Vec<_> = b
        .pull(10)
        .unwrap()
        .iter()
        .map(|e| (e.item_name.clone(), e.values.clone()))
        .collect();
    assert_eq!(first, second);
}

#[test]
fn test_shell_session() {
    let mut t = LootTest::bundled();
    let script = ["select weapons", "pull 3", "up 2", "delete 1", "export"];

    for line in script {
        let command = shell::parse_command(line).unwrap().unwrap();
        assert!(matches!(shell::execute(&mut t.controller, command), Reply::Output(_)));
    }

    assert_eq!(t.controller.session().results().len(), 2);
    assert_eq!(t.exported_files().len(), 1);
    assert_eq!(shell::execute(&mut t.controller, Command::Quit), Reply::Quit);
}

#[test]
fn test_custom_catalog_with_fallback_notice() {
    let catalog = Catalog::fallback(FALLBACK_NOTICE);
    assert_eq!(catalog.advisory(), Some(FALLBACK_NOTICE));
    assert_eq!(catalog.tables().len(), 1);
}
