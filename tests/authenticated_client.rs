use std::sync::Arc;

use mockito::{Matcher, Server};
use reqwest::Method;
use serde_json::{json, Value};

use spinwheel_cli::client::AuthenticatedClient;
use spinwheel_cli::session::{MemorySessionStore, Session, SessionStore};
use spinwheel_cli::SpinwheelError;

fn store_with(access: &str, refresh: &str) -> Arc<MemorySessionStore> {
    Arc::new(MemorySessionStore::with_session(&Session {
        access_token: access.to_string(),
        refresh_token: refresh.to_string(),
    }))
}

fn client(server: &Server, store: Arc<MemorySessionStore>) -> AuthenticatedClient {
    AuthenticatedClient::new(server.url(), store).unwrap()
}

async fn json_body(response: reqwest::Response) -> Value {
    response.json().await.unwrap()
}

#[tokio::test]
async fn test_attaches_bearer_token() {
    let mut server = Server::new_async().await;
    let wheel = server
        .mock("GET", "/wheel/")
        .match_header("authorization", "Bearer access-1")
        .match_header("content-type", "application/json")
        .with_status(200)
        .with_body(r#"{"result": 4}"#)
        .create_async()
        .await;

    let client = client(&server, store_with("access-1", "refresh-1"));
    let response = client.request(Method::GET, "/wheel/", None, None).await.unwrap();

    assert_eq!(json_body(response).await["result"], 4);
    wheel.assert_async().await;
}

#[tokio::test]
async fn test_no_authorization_header_without_session() {
    let mut server = Server::new_async().await;
    let wheel = server
        .mock("GET", "/wheel/")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_body(r#"{"result": 1}"#)
        .create_async()
        .await;

    let client = client(&server, Arc::new(MemorySessionStore::new()));
    client.request(Method::GET, "/wheel/", None, None).await.unwrap();

    wheel.assert_async().await;
}

#[tokio::test]
async fn test_refreshes_once_and_replays_with_new_token() {
    let mut server = Server::new_async().await;
    let rejected = server
        .mock("GET", "/history/")
        .match_header("authorization", "Bearer stale")
        .with_status(401)
        .with_body(r#"{"detail": "Token is invalid or expired"}"#)
        .expect(1)
        .create_async()
        .await;
    let refresh = server
        .mock("POST", "/auth/refresh/")
        .match_header("authorization", Matcher::Missing)
        .match_body(Matcher::Json(json!({ "refresh": "refresh-1" })))
        .with_status(200)
        .with_body(r#"{"access": "fresh"}"#)
        .expect(1)
        .create_async()
        .await;
    let replayed = server
        .mock("GET", "/history/")
        .match_header("authorization", "Bearer fresh")
        .with_status(200)
        .with_body("[]")
        .expect(1)
        .create_async()
        .await;

    let store = store_with("stale", "refresh-1");
    let client = client(&server, store.clone());
    let response = client.request(Method::GET, "/history/", None, None).await.unwrap();

    assert_eq!(json_body(response).await, json!([]));
    assert_eq!(store.access_token().as_deref(), Some("fresh"));
    assert_eq!(store.refresh_token().as_deref(), Some("refresh-1"));

    rejected.assert_async().await;
    refresh.assert_async().await;
    replayed.assert_async().await;
}

#[tokio::test]
async fn test_replay_carries_original_body_and_query() {
    let mut server = Server::new_async().await;
    let _rejected = server
        .mock("POST", Matcher::Regex(r"^/history/".to_string()))
        .match_header("authorization", "Bearer stale")
        .with_status(401)
        .create_async()
        .await;
    let _refresh = server
        .mock("POST", "/auth/refresh/")
        .with_status(200)
        .with_body(r#"{"access": "fresh"}"#)
        .create_async()
        .await;
    let replayed = server
        .mock("POST", Matcher::Regex(r"^/history/".to_string()))
        .match_header("authorization", "Bearer fresh")
        .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
        .match_body(Matcher::Json(json!({ "action": "wheel_spin", "details": { "result": 7 } })))
        .with_status(201)
        .with_body(r#"{"id": 1}"#)
        .expect(1)
        .create_async()
        .await;

    let client = client(&server, store_with("stale", "refresh-1"));
    let body = json!({ "action": "wheel_spin", "details": { "result": 7 } });
    let params = vec![("page".to_string(), "2".to_string())];

    client
        .request(Method::POST, "/history/", Some(&body), Some(&params))
        .await
        .unwrap();

    replayed.assert_async().await;
}

#[tokio::test]
async fn test_rotated_refresh_token_is_persisted() {
    let mut server = Server::new_async().await;
    let _rejected = server
        .mock("GET", "/wheel/")
        .match_header("authorization", "Bearer stale")
        .with_status(401)
        .create_async()
        .await;
    let _refresh = server
        .mock("POST", "/auth/refresh/")
        .with_status(200)
        .with_body(r#"{"access": "fresh", "refresh": "refresh-2"}"#)
        .create_async()
        .await;
    let _replayed = server
        .mock("GET", "/wheel/")
        .match_header("authorization", "Bearer fresh")
        .with_status(200)
        .with_body(r#"{"result": 2}"#)
        .create_async()
        .await;

    let store = store_with("stale", "refresh-1");
    client(&server, store.clone())
        .request(Method::GET, "/wheel/", None, None)
        .await
        .unwrap();

    assert_eq!(store.refresh_token().as_deref(), Some("refresh-2"));
}

#[tokio::test]
async fn test_failed_refresh_clears_session() {
    let mut server = Server::new_async().await;
    let _rejected = server
        .mock("GET", "/wheel/")
        .with_status(401)
        .expect(1)
        .create_async()
        .await;
    let refresh = server
        .mock("POST", "/auth/refresh/")
        .with_status(401)
        .with_body(r#"{"detail": "Token is blacklisted"}"#)
        .expect(1)
        .create_async()
        .await;

    let store = store_with("stale", "revoked");
    let result = client(&server, store.clone())
        .request(Method::GET, "/wheel/", None, None)
        .await;

    assert!(matches!(result, Err(SpinwheelError::SessionExpired)));
    assert!(store.access_token().is_none());
    assert!(store.refresh_token().is_none());
    refresh.assert_async().await;
}

#[tokio::test]
async fn test_never_retries_more_than_once() {
    let mut server = Server::new_async().await;
    let wheel = server
        .mock("GET", "/wheel/")
        .with_status(401)
        .with_body(r#"{"detail": "Nope"}"#)
        .expect(2)
        .create_async()
        .await;
    let refresh = server
        .mock("POST", "/auth/refresh/")
        .with_status(200)
        .with_body(r#"{"access": "fresh"}"#)
        .expect(1)
        .create_async()
        .await;

    let store = store_with("stale", "refresh-1");
    let result = client(&server, store.clone())
        .request(Method::GET, "/wheel/", None, None)
        .await;

    match result {
        Err(SpinwheelError::Unauthorized(detail)) => assert_eq!(detail, "Nope"),
        other => panic!("Expected Unauthorized, got {:?}", other.map(|r| r.status())),
    }
    // The refresh itself succeeded, so the session stays
    assert_eq!(store.access_token().as_deref(), Some("fresh"));

    wheel.assert_async().await;
    refresh.assert_async().await;
}

#[tokio::test]
async fn test_other_errors_propagate_without_refresh() {
    let mut server = Server::new_async().await;
    let _teams = server
        .mock("GET", "/teams/")
        .with_status(400)
        .with_body(r#"{"detail": "Not enough players"}"#)
        .create_async()
        .await;
    let _wheel = server
        .mock("GET", "/wheel/")
        .with_status(503)
        .create_async()
        .await;
    let refresh = server.mock("POST", "/auth/refresh/").expect(0).create_async().await;

    let client = client(&server, store_with("access-1", "refresh-1"));

    match client.request(Method::GET, "/teams/", None, None).await {
        Err(SpinwheelError::Backend { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "Not enough players");
        }
        other => panic!("Expected Backend error, got {:?}", other.map(|r| r.status())),
    }

    match client.request(Method::GET, "/wheel/", None, None).await {
        Err(SpinwheelError::Backend { status, .. }) => assert_eq!(status, 503),
        other => panic!("Expected Backend error, got {:?}", other.map(|r| r.status())),
    }

    refresh.assert_async().await;
}

#[tokio::test]
async fn test_401_without_refresh_token_expires_session() {
    let mut server = Server::new_async().await;
    let _history = server
        .mock("GET", "/history/")
        .match_header("authorization", "Bearer stale")
        .with_status(401)
        .expect(1)
        .create_async()
        .await;
    let refresh = server.mock("POST", "/auth/refresh/").expect(0).create_async().await;

    let store = Arc::new(MemorySessionStore::new());
    store.set("token", "stale").unwrap();

    let result = client(&server, store.clone())
        .request(Method::GET, "/history/", None, None)
        .await;

    assert!(matches!(result, Err(SpinwheelError::SessionExpired)));
    assert!(store.access_token().is_none());
    assert!(store.refresh_token().is_none());
    refresh.assert_async().await;
}

#[tokio::test]
async fn test_refresh_server_error_clears_session() {
    let mut server = Server::new_async().await;
    let _rejected = server
        .mock("GET", "/history/")
        .with_status(401)
        .expect(1)
        .create_async()
        .await;
    let refresh = server
        .mock("POST", "/auth/refresh/")
        .with_status(500)
        .with_body("Internal Server Error")
        .expect(1)
        .create_async()
        .await;

    let store = store_with("stale", "refresh-1");
    let result = client(&server, store.clone())
        .request(Method::GET, "/history/", None, None)
        .await;

    assert!(matches!(result, Err(SpinwheelError::SessionExpired)));
    assert!(store.access_token().is_none());
    assert!(store.refresh_token().is_none());
    refresh.assert_async().await;
}

#[tokio::test]
async fn test_credential_endpoints_do_not_refresh() {
    let mut server = Server::new_async().await;
    let _login = server
        .mock("POST", "/auth/login/")
        .with_status(401)
        .with_body(r#"{"detail": "Bad credentials"}"#)
        .create_async()
        .await;
    let refresh = server.mock("POST", "/auth/refresh/").expect(0).create_async().await;

    let store = store_with("access-1", "refresh-1");
    let body = json!({ "username": "robin", "password": "wrong" });
    let result = client(&server, store.clone())
        .request(Method::POST, "/auth/login/", Some(&body), None)
        .await;

    assert!(matches!(result, Err(SpinwheelError::Unauthorized(_))));
    assert_eq!(store.access_token().as_deref(), Some("access-1"));
    refresh.assert_async().await;
}

#[tokio::test]
async fn test_concurrent_401s_share_one_refresh() {
    let mut server = Server::new_async().await;
    let _rejected = server
        .mock("GET", "/wheel/")
        .match_header("authorization", "Bearer stale")
        .with_status(401)
        .create_async()
        .await;
    let refresh = server
        .mock("POST", "/auth/refresh/")
        .with_status(200)
        .with_body(r#"{"access": "fresh"}"#)
        .expect(1)
        .create_async()
        .await;
    let _accepted = server
        .mock("GET", "/wheel/")
        .match_header("authorization", "Bearer fresh")
        .with_status(200)
        .with_body(r#"{"result": 9}"#)
        .create_async()
        .await;

    let store = store_with("stale", "refresh-1");
    let client = client(&server, store.clone());

    let (a, b, c) = tokio::join!(
        client.request(Method::GET, "/wheel/", None, None),
        client.request(Method::GET, "/wheel/", None, None),
        client.request(Method::GET, "/wheel/", None, None),
    );

    for response in [a, b, c] {
        assert_eq!(response.unwrap().status(), 200);
    }
    assert_eq!(store.access_token().as_deref(), Some("fresh"));
    refresh.assert_async().await;
}

#[tokio::test]
async fn test_network_failure_is_reported() {
    // Nothing listens on port 9 on a test machine
    let client = AuthenticatedClient::new("http://127.0.0.1:9", Arc::new(MemorySessionStore::new())).unwrap();
    let result = client.request(Method::GET, "/wheel/", None, None).await;
    assert!(matches!(result, Err(SpinwheelError::Network(_))));
}
