use pagetrack::{session::load_or_create_session_id, KeyValueStore, SqliteStore};

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[tokio::test]
async fn sqlite_store_round_trips() {
    init_logs();
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteStore::new(dir.path().join("pagetrack.sqlite3")).unwrap();

    assert_eq!(store.get("session_id").await.unwrap(), None);

    store.set("session_id", "sess_1_abc").await.unwrap();
    assert_eq!(
        store.get("session_id").await.unwrap().as_deref(),
        Some("sess_1_abc")
    );

    store.set("session_id", "sess_2_def").await.unwrap();
    assert_eq!(
        store.get("session_id").await.unwrap().as_deref(),
        Some("sess_2_def")
    );
}

#[tokio::test]
async fn sqlite_store_survives_a_reopen() {
    init_logs();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pagetrack.sqlite3");

    {
        let store = SqliteStore::new(path.clone()).unwrap();
        store.set("session_id", "sess_42_persisted").await.unwrap();
    }

    let reopened = SqliteStore::new(path).unwrap();
    assert_eq!(
        reopened.get("session_id").await.unwrap().as_deref(),
        Some("sess_42_persisted")
    );
}

#[tokio::test]
async fn session_identity_survives_a_reload() {
    init_logs();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pagetrack.sqlite3");

    let first = {
        let store = SqliteStore::new(path.clone()).unwrap();
        load_or_create_session_id(&store, "session_id").await
    };

    let store = SqliteStore::new(path).unwrap();
    let second = load_or_create_session_id(&store, "session_id").await;

    assert_eq!(first, second);
    assert!(first.starts_with("sess_"));
}

#[tokio::test]
async fn unrelated_keys_do_not_collide() {
    init_logs();
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteStore::new(dir.path().join("pagetrack.sqlite3")).unwrap();

    store.set("session_id", "sess_1_abc").await.unwrap();
    store.set("last_page", "/pricing").await.unwrap();

    assert_eq!(
        store.get("session_id").await.unwrap().as_deref(),
        Some("sess_1_abc")
    );
    assert_eq!(
        store.get("last_page").await.unwrap().as_deref(),
        Some("/pricing")
    );
}
