use courtside::models::UserData;
use courtside::session::{MemorySessionStore, SessionData, SessionStore};

fn sample_session() -> SessionData {
    SessionData {
        token: "tok_abc123".to_string(),
        user: UserData {
            id: 1,
            email: "coach@example.test".to_string(),
            display_name: "Coach".to_string(),
            role: "admin".to_string(),
        },
    }
}

#[test]
fn test_session_store_roundtrip() {
    let store = MemorySessionStore::new();
    assert!(store.load().is_none());
    assert!(store.token().is_none());

    store.store(sample_session());

    let loaded = store.load().expect("Failed to load stored session");
    assert_eq!(loaded.token, "tok_abc123");
    assert_eq!(loaded.user.email, "coach@example.test");
    assert_eq!(store.token().as_deref(), Some("tok_abc123"));
}

#[test]
fn test_clear_drops_the_token() {
    let store = MemorySessionStore::new();
    store.store(sample_session());
    store.clear();

    assert!(store.load().is_none());
    assert!(store.token().is_none());
}

#[test]
fn test_store_replaces_the_previous_session() {
    let store = MemorySessionStore::new();
    store.store(sample_session());

    let mut next = sample_session();
    next.token = "tok_next".to_string();
    store.store(next);

    assert_eq!(store.token().as_deref(), Some("tok_next"));
}
