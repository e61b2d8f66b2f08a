//! Repair-on-load behavior of the shared JSON document.

use engine::{Engine, StoreData};

fn engine_in(dir: &tempfile::TempDir) -> Engine {
    Engine::new(dir.path().join("finance_data.json"))
}

#[test]
fn missing_file_yields_default_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine_in(&dir);

    let demo = engine.authenticate("demo", "demo123").unwrap();
    assert_eq!(demo.id, 1);
    assert_eq!(demo.risk_profile, 2);
}

#[test]
fn bootstrap_creates_the_file_once() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine_in(&dir);

    engine.bootstrap().unwrap();
    assert!(engine.data_file().exists());

    // A second bootstrap must not clobber existing state.
    engine.register("alice", "password", "").unwrap();
    engine.bootstrap().unwrap();
    assert!(engine.authenticate("alice", "password").is_ok());
}

#[test]
fn empty_and_malformed_files_fall_back_to_defaults() {
    for content in ["", "   \n", "{not json", "[1, 2, 3]", "42"] {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine_in(&dir);
        std::fs::write(engine.data_file(), content).unwrap();

        let demo = engine.user(1).unwrap();
        assert_eq!(demo.username, "demo");
    }
}

#[test]
fn missing_keys_are_repaired_without_losing_users() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine_in(&dir);

    // A document with users but none of the shared reference keys.
    std::fs::write(
        engine.data_file(),
        r#"{"users": [{"id": 7, "username": "кира", "password_hash": "x",
            "created_at": "2024-05-01"}]}"#,
    )
    .unwrap();

    let data = engine.user_data(7).unwrap();
    assert_eq!(data.user_info.username, "кира");
    // Reference data filled in from the defaults.
    assert!(data.categories.income.contains(&"Зарплата".to_string()));
    assert_eq!(data.risk_profiles.len(), 3);
    assert!(data.investment_types.contains(&"ETF".to_string()));
    // Missing per-user lists default to empty.
    assert!(data.transactions.is_empty());
}

#[test]
fn missing_users_key_yields_demo_but_keeps_reference_data() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine_in(&dir);

    std::fs::write(
        engine.data_file(),
        r#"{"investment_types": ["Марки"]}"#,
    )
    .unwrap();

    let data = engine.user_data(1).unwrap();
    assert_eq!(data.user_info.username, "demo");
    assert_eq!(data.investment_types, ["Марки"]);
}

#[test]
fn saved_document_is_pretty_printed_and_reloadable() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine_in(&dir);

    engine.bootstrap().unwrap();
    let text = std::fs::read_to_string(engine.data_file()).unwrap();
    // 2-space indent, non-ASCII written verbatim.
    assert!(text.contains("\n  \"users\""));
    assert!(text.contains("Зарплата"));

    let parsed: StoreData = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, StoreData::default());
}
