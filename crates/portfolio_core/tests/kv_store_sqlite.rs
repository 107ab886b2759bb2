use portfolio_core::db::open_db_in_memory;
use portfolio_core::{KeyValueStore, SqliteKvStore};

#[test]
fn set_item_upserts_single_row_per_key() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKvStore::try_new(&conn).unwrap();

    store.set_item("portfolio_admin", "true").unwrap();
    store.set_item("portfolio_admin", "true").unwrap();
    store.set_item("portfolio_admin_time", "1700000000000").unwrap();

    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM kv_entries;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 2);
}

#[test]
fn missing_key_reads_as_none_and_remove_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKvStore::try_new(&conn).unwrap();

    assert_eq!(store.get_item("career_skills_added").unwrap(), None);

    store.set_item("career_skills_added", "[]").unwrap();
    store.remove_item("career_skills_added").unwrap();
    store.remove_item("career_skills_added").unwrap();
    assert_eq!(store.get_item("career_skills_added").unwrap(), None);
}

#[test]
fn keys_with_prefix_lists_one_collection() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKvStore::try_new(&conn).unwrap();

    store.set_item("career_awards_order", "[]").unwrap();
    store.set_item("career_awards_edits", "{}").unwrap();
    store.set_item("career_academicProjects_order", "[]").unwrap();
    store.set_item("portfolio_admin", "true").unwrap();

    assert_eq!(
        store.keys_with_prefix("career_awards_").unwrap(),
        vec!["career_awards_edits", "career_awards_order"]
    );
}
