use std::collections::HashSet;
use std::time::Duration;

use demo_client::{Client, ClientError, JsonServerClient};
use demo_jsonserver::{BackgroundServer, JsonServer, ServerConfig};
use serde_json::{json, Value};

fn start_server() -> BackgroundServer {
    JsonServer::new(ServerConfig::ephemeral("posts"))
        .unwrap()
        .spawn_background()
        .unwrap()
}

fn json_of(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap()
}

#[test]
fn create_read_update_delete_lifecycle() {
    let server = start_server();
    let client = JsonServerClient::new(&server.collection_url()).unwrap();

    let id = client.create(br#"{"name": "foo"}"#).unwrap();
    assert_eq!(id, "1");

    let got = client.read(&id).unwrap();
    assert_eq!(json_of(&got), json!({"id": 1, "name": "foo"}));

    client.update(&id, br#"{"name": "bar"}"#).unwrap();
    let got = client.read(&id).unwrap();
    assert_eq!(json_of(&got), json!({"id": 1, "name": "bar"}));

    client.delete(&id).unwrap();
    let err = client.read(&id).unwrap_err();
    assert!(err.is_not_found(), "read after delete: {err}");
}

#[test]
fn read_returns_raw_body() {
    let server = start_server();
    let client = JsonServerClient::new(&server.collection_url()).unwrap();

    let id = client.create(br#"{"name":"foo","nested":{"age":3}}"#).unwrap();
    let got = client.read(&id).unwrap();
    assert_eq!(json_of(&got)["nested"], json!({"age": 3}));
}

#[test]
fn sequential_creates_yield_distinct_ids() {
    let server = start_server();
    let client = JsonServerClient::new(&server.collection_url()).unwrap();

    let ids: Vec<String> = (0..10)
        .map(|i| client.create(format!(r#"{{"n": {i}}}"#).as_bytes()).unwrap())
        .collect();
    let unique: HashSet<&String> = ids.iter().collect();
    assert_eq!(unique.len(), ids.len());
    assert_eq!(ids.first().map(String::as_str), Some("1"));
    assert_eq!(ids.last().map(String::as_str), Some("10"));
}

#[test]
fn create_with_rejected_body_reports_status_and_message() {
    let server = start_server();
    let client = JsonServerClient::new(&server.collection_url()).unwrap();

    let err = client.create(b"not json").unwrap_err();
    match err {
        ClientError::UnexpectedStatus { status, body } => {
            assert_eq!(status, 400);
            assert!(body.contains("unmarshal request"), "body: {body}");
        }
        other => panic!("expected unexpected status, got {other:?}"),
    }
}

#[test]
fn update_and_delete_of_missing_id_are_status_errors() {
    let server = start_server();
    let client = JsonServerClient::new(&server.collection_url()).unwrap();

    let err = client.update("42", b"{}").unwrap_err();
    assert_eq!(err.status_code(), Some(404));
    assert!(!err.is_not_found());

    let err = client.delete("42").unwrap_err();
    assert_eq!(err.status_code(), Some(404));
    assert!(!err.is_not_found());
}

#[test]
fn wrong_collection_path_is_a_status_error() {
    let server = start_server();
    let url = format!("http://{}/comments", server.addr());
    let client = JsonServerClient::new(&url).unwrap();

    let err = client.create(br#"{"name":"foo"}"#).unwrap_err();
    assert!(matches!(err, ClientError::UnexpectedStatus { .. }));
}

#[test]
fn connection_refused_is_transport_error() {
    let server = start_server();
    let url = server.collection_url();
    server.shutdown();

    let client = JsonServerClient::with_timeout(&url, Duration::from_secs(2)).unwrap();
    let err = client.read("1").unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)), "got {err:?}");
}

#[test]
fn shared_across_threads() {
    let server = start_server();
    let client = std::sync::Arc::new(JsonServerClient::new(&server.collection_url()).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let client = client.clone();
            std::thread::spawn(move || {
                let id = client.create(format!(r#"{{"worker": {i}}}"#).as_bytes()).unwrap();
                json_of(&client.read(&id).unwrap())["worker"].clone()
            })
        })
        .collect();

    let mut workers: Vec<i64> = handles
        .into_iter()
        .map(|h| h.join().unwrap().as_i64().unwrap())
        .collect();
    workers.sort();
    assert_eq!(workers, vec![0, 1, 2, 3]);
}

mod stub {
    use std::net::SocketAddr;
    use std::time::Duration;

    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::json;

    /// A hand-scripted service for responses the json-server double never
    /// sends.
    pub struct StubServer {
        pub addr: SocketAddr,
        _runtime: tokio::runtime::Runtime,
    }

    impl StubServer {
        pub fn url(&self, path: &str) -> String {
            format!("http://{}/{path}", self.addr)
        }
    }

    pub fn start() -> StubServer {
        let app = Router::new()
            .route(
                "/ok-create",
                post(|| async { (StatusCode::OK, Json(json!({"id": 7, "name": "foo"}))) }),
            )
            .route(
                "/no-id",
                post(|| async { (StatusCode::CREATED, Json(json!({"name": "foo"}))) }),
            )
            .route(
                "/string-id",
                post(|| async { (StatusCode::CREATED, Json(json!({"id": "abc"}))) }),
            )
            .route(
                "/html",
                post(|| async { (StatusCode::CREATED, "<html>hello</html>") }),
            )
            .route(
                "/broken/:id",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "database is down") }),
            )
            .route(
                "/slow/:id",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(32)).await;
                    (StatusCode::OK, r#"{"id": 1}"#)
                }),
            );

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();
        let listener = runtime
            .block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))
            .unwrap();
        let addr = listener.local_addr().unwrap();
        runtime.spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        StubServer {
            addr,
            _runtime: runtime,
        }
    }
}

#[test]
fn create_accepts_200_ok() {
    let stub = stub::start();
    let client = JsonServerClient::new(&stub.url("ok-create")).unwrap();
    assert_eq!(client.create(br#"{"name":"foo"}"#).unwrap(), "7");
}

#[test]
fn create_without_numeric_id_is_protocol_error() {
    let stub = stub::start();
    for path in ["no-id", "string-id", "html"] {
        let client = JsonServerClient::new(&stub.url(path)).unwrap();
        let err = client.create(b"{}").unwrap_err();
        assert!(matches!(err, ClientError::Protocol(_)), "{path}: {err:?}");
    }
}

#[test]
fn read_with_server_error_reports_status_and_message() {
    let stub = stub::start();
    let client = JsonServerClient::new(&stub.url("broken")).unwrap();

    let err = client.read("1").unwrap_err();
    assert!(!err.is_not_found());
    match err {
        ClientError::UnexpectedStatus { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "database is down");
        }
        other => panic!("expected unexpected status, got {other:?}"),
    }
}

#[test]
fn read_of_missing_id_carries_404() {
    let server = start_server();
    let client = JsonServerClient::new(&server.collection_url()).unwrap();

    let err = client.read("42").unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.status_code(), Some(404));
}

#[test]
fn default_client_waits_past_thirty_seconds() {
    let stub = stub::start();
    let client = JsonServerClient::new(&stub.url("slow")).unwrap();

    let body = client.read("1").unwrap();
    assert_eq!(json_of(&body), json!({"id": 1}));
}

#[test]
fn explicit_timeout_bounds_a_slow_read() {
    let stub = stub::start();
    let client =
        JsonServerClient::with_timeout(&stub.url("slow"), Duration::from_millis(300)).unwrap();

    match client.read("1").unwrap_err() {
        ClientError::Transport(e) => assert!(e.is_timeout(), "{e}"),
        other => panic!("expected transport timeout, got {other:?}"),
    }
}
