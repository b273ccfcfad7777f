use crate::constants::{REFRESH_TOKEN_KEY, TOKEN_KEY};
use crate::session::{FileSessionStore, MemorySessionStore, Session, SessionStore};

fn session() -> Session {
    Session {
        access_token: "access-1".to_string(),
        refresh_token: "refresh-1".to_string(),
    }
}

#[test]
fn test_memory_store_roundtrip_and_clear() {
    let store = MemorySessionStore::new();
    assert!(store.load_session().is_none());

    store.save_session(&session()).unwrap();
    assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("access-1"));
    assert_eq!(store.get(REFRESH_TOKEN_KEY).as_deref(), Some("refresh-1"));
    assert_eq!(store.load_session(), Some(session()));

    store.clear().unwrap();
    assert!(store.access_token().is_none());
    assert!(store.refresh_token().is_none());
}

#[test]
fn test_partial_session_is_not_a_session() {
    let store = MemorySessionStore::new();
    store.set(TOKEN_KEY, "only-access").unwrap();
    assert!(store.load_session().is_none());
}

#[test]
fn test_file_store_persists_across_instances() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let store = FileSessionStore::open(&path);
    store.save_session(&session()).unwrap();

    let reopened = FileSessionStore::open(&path);
    assert_eq!(reopened.load_session(), Some(session()));

    let contents = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(value["token"], "access-1");
    assert_eq!(value["refreshToken"], "refresh-1");
}

#[test]
fn test_file_store_clear_removes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let store = FileSessionStore::open(&path);
    store.save_session(&session()).unwrap();
    assert!(path.exists());

    store.clear().unwrap();
    assert!(!path.exists());
    assert!(FileSessionStore::open(&path).load_session().is_none());
}

#[test]
fn test_file_store_ignores_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{not json").unwrap();

    let store = FileSessionStore::open(&path);
    assert!(store.access_token().is_none());

    store.set(TOKEN_KEY, "fresh").unwrap();
    assert_eq!(FileSessionStore::open(&path).access_token().as_deref(), Some("fresh"));
}

#[cfg(unix)]
#[test]
fn test_file_store_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    FileSessionStore::open(&path).save_session(&session()).unwrap();

    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}
