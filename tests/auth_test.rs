use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use courtside::api::{BackendClient, HttpBackendClient};
use courtside::config::ApiConfig;
use courtside::error::ApiError;
use courtside::models::UserData;
use courtside::session::{MemorySessionStore, SessionData, SessionStore};

fn signed_in_store() -> Arc<MemorySessionStore> {
    let store = Arc::new(MemorySessionStore::new());
    store.store(SessionData {
        token: "tok_stale".to_string(),
        user: UserData {
            id: 1,
            email: "coach@example.test".to_string(),
            display_name: "Coach".to_string(),
            role: "admin".to_string(),
        },
    });
    store
}

/// Answers every connection with the given canned response. Enough of an
/// HTTP server for a client that sends one small request per connection.
async fn spawn_canned_server(response: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read listener addr");

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let mut buf = [0u8; 2048];
            let _ = socket.read(&mut buf).await;
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    addr
}

#[tokio::test]
async fn test_admin_calls_without_a_token_fail_before_any_request() {
    // Nothing listens on this address; reaching it would surface as a
    // Transport error, not Unauthorized.
    let config = ApiConfig::new("http://127.0.0.1:9");
    let client = HttpBackendClient::new(config).expect("Failed to create client");

    let err = client
        .list_media()
        .await
        .expect_err("an admin call without a session must fail");

    assert!(matches!(err, ApiError::Unauthorized), "got {:?}", err);
}

#[tokio::test]
async fn test_a_401_response_clears_the_stored_session() {
    let addr = spawn_canned_server(
        "HTTP/1.1 401 Unauthorized\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
    )
    .await;

    let store = signed_in_store();
    let config = ApiConfig::new(format!("http://{}", addr));
    let client = HttpBackendClient::with_session_store(config, store.clone())
        .expect("Failed to create client");

    let err = client
        .list_media()
        .await
        .expect_err("a rejected token must fail the call");

    assert!(matches!(err, ApiError::Unauthorized), "got {:?}", err);
    assert!(
        store.token().is_none(),
        "a rejected token must not be kept for replay"
    );
}

#[tokio::test]
async fn test_a_401_on_a_public_endpoint_keeps_the_session() {
    let addr = spawn_canned_server(
        "HTTP/1.1 401 Unauthorized\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
    )
    .await;

    let store = signed_in_store();
    let config = ApiConfig::new(format!("http://{}", addr));
    let client = HttpBackendClient::with_session_store(config, store.clone())
        .expect("Failed to create client");

    // Confirmation lookups never send the admin token, so a 401 from them
    // says nothing about it.
    let err = client
        .fetch_confirmation("bk_1")
        .await
        .expect_err("the canned 401 must fail the call");

    assert!(matches!(err, ApiError::Unauthorized), "got {:?}", err);
    assert!(
        store.token().is_some(),
        "no token was sent, so none may be dropped"
    );
}

#[tokio::test]
async fn test_other_statuses_keep_the_session() {
    let addr = spawn_canned_server(
        "HTTP/1.1 500 Internal Server Error\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
    )
    .await;

    let store = signed_in_store();
    let config = ApiConfig::new(format!("http://{}", addr));
    let client = HttpBackendClient::with_session_store(config, store.clone())
        .expect("Failed to create client");

    let err = client
        .list_media()
        .await
        .expect_err("a server error must fail the call");

    match err {
        ApiError::Backend { status, .. } => assert_eq!(status, 500),
        other => panic!("expected Backend, got {:?}", other),
    }
    assert!(
        store.token().is_some(),
        "a server error is not an auth failure"
    );
}
