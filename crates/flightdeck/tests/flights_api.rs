//! End-to-end tests for the `/flights` HTTP API.

use std::net::SocketAddr;
use std::sync::Arc;

use flightdeck::config::ServerConfig;
use flightdeck::{MemoryRepository, Server};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

struct TestServer {
    addr: SocketAddr,
    client: Client,
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<flightdeck::Result<()>>,
}

impl TestServer {
    async fn start() -> Self {
        let config = ServerConfig {
            port: 0,
            ..ServerConfig::default()
        };
        let server = Server::bind(&config, Arc::new(MemoryRepository::new()))
            .await
            .expect("server must bind");
        let addr = server.local_addr().expect("server must have an address");

        let (shutdown, shutdown_rx) = oneshot::channel();
        let handle = tokio::spawn(server.run(async move {
            let _ = shutdown_rx.await;
        }));

        Self {
            addr,
            client: Client::new(),
            shutdown,
            handle,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    async fn post(&self, body: &Value) -> reqwest::Response {
        self.client
            .post(self.url("/flights"))
            .json(body)
            .send()
            .await
            .expect("POST must complete")
    }

    async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET must complete")
    }

    async fn put(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("PUT must complete")
    }

    async fn delete(&self, path: &str) -> reqwest::Response {
        self.client
            .delete(self.url(path))
            .send()
            .await
            .expect("DELETE must complete")
    }

    async fn stop(self) {
        let Self {
            client,
            shutdown,
            handle,
            ..
        } = self;
        // Release pooled keep-alive connections before draining
        drop(client);
        let _ = shutdown.send(());
        handle
            .await
            .expect("server task must not panic")
            .expect("server must shut down cleanly");
    }
}

#[tokio::test]
async fn test_create_returns_created_and_echoes() {
    let server = TestServer::start().await;

    let response = server.post(&json!({"id": 1, "origin": "A"})).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"id": 1, "origin": "A"}));

    server.stop().await;
}

#[tokio::test]
async fn test_list_in_insertion_order() {
    let server = TestServer::start().await;

    let empty: Value = server.get("/flights").await.json().await.unwrap();
    assert_eq!(empty, json!([]));

    server.post(&json!({"id": 2, "origin": "B"})).await;
    server.post(&json!({"id": 1, "origin": "A"})).await;

    let response = server.get("/flights").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!([{"id": 2, "origin": "B"}, {"id": 1, "origin": "A"}])
    );

    server.stop().await;
}

#[tokio::test]
async fn test_get_found_and_not_found() {
    let server = TestServer::start().await;
    server.post(&json!({"id": 5})).await;

    let found = server.get("/flights/5").await;
    assert_eq!(found.status(), StatusCode::OK);
    assert_eq!(found.json::<Value>().await.unwrap(), json!({"id": 5}));

    let missing = server.get("/flights/6").await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    assert!(missing
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("text/plain")));
    assert_eq!(missing.text().await.unwrap(), "Flight not found");

    server.stop().await;
}

#[tokio::test]
async fn test_get_with_lenient_id() {
    let server = TestServer::start().await;
    server.post(&json!({"id": 12, "origin": "A"})).await;

    let found = server.get("/flights/12abc").await;
    assert_eq!(found.status(), StatusCode::OK);

    let not_numeric = server.get("/flights/abc").await;
    assert_eq!(not_numeric.status(), StatusCode::NOT_FOUND);

    server.stop().await;
}

#[tokio::test]
async fn test_update_merges_fields() {
    let server = TestServer::start().await;
    server
        .post(&json!({"id": 1, "origin": "A", "gate": "B2"}))
        .await;

    let response = server.put("/flights/1", &json!({"gate": "C1"})).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"id": 1, "origin": "A", "gate": "C1"}));

    let stored: Value = server.get("/flights/1").await.json().await.unwrap();
    assert_eq!(stored, body);

    server.stop().await;
}

#[tokio::test]
async fn test_update_missing_leaves_collection_unchanged() {
    let server = TestServer::start().await;
    server.post(&json!({"id": 1, "gate": "B2"})).await;

    let response = server.put("/flights/2", &json!({"gate": "C1"})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.text().await.unwrap(), "Flight not found");

    let all: Value = server.get("/flights").await.json().await.unwrap();
    assert_eq!(all, json!([{"id": 1, "gate": "B2"}]));

    server.stop().await;
}

#[tokio::test]
async fn test_update_can_move_record_to_new_id() {
    let server = TestServer::start().await;
    server.post(&json!({"id": 1})).await;

    server.put("/flights/1", &json!({"id": 10})).await;

    assert_eq!(server.get("/flights/1").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(server.get("/flights/10").await.status(), StatusCode::OK);

    server.stop().await;
}

#[tokio::test]
async fn test_delete_returns_removed_in_array() {
    let server = TestServer::start().await;
    server.post(&json!({"id": 1})).await;
    server.post(&json!({"id": 2})).await;

    let response = server.delete("/flights/1").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!([{"id": 1}]));

    let all: Value = server.get("/flights").await.json().await.unwrap();
    assert_eq!(all, json!([{"id": 2}]));

    let again = server.delete("/flights/1").await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);

    server.stop().await;
}

#[tokio::test]
async fn test_duplicate_ids_affect_first_only() {
    let server = TestServer::start().await;
    server.post(&json!({"id": 7, "n": 1})).await;
    server.post(&json!({"id": 7, "n": 2})).await;

    let first: Value = server.get("/flights/7").await.json().await.unwrap();
    assert_eq!(first, json!({"id": 7, "n": 1}));

    server.put("/flights/7", &json!({"gate": "A1"})).await;
    let removed: Value = server.delete("/flights/7").await.json().await.unwrap();
    assert_eq!(removed, json!([{"id": 7, "n": 1, "gate": "A1"}]));

    let remaining: Value = server.get("/flights").await.json().await.unwrap();
    assert_eq!(remaining, json!([{"id": 7, "n": 2}]));

    server.stop().await;
}

#[tokio::test]
async fn test_body_without_content_type() {
    let server = TestServer::start().await;

    let response = server
        .client
        .post(server.url("/flights"))
        .body(r#"{"id": 3}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.json::<Value>().await.unwrap(), json!({"id": 3}));

    let empty = server
        .client
        .post(server.url("/flights"))
        .send()
        .await
        .unwrap();
    assert_eq!(empty.status(), StatusCode::CREATED);
    assert_eq!(empty.json::<Value>().await.unwrap(), json!({}));

    server.stop().await;
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let server = TestServer::start().await;

    let response = server
        .client
        .post(server.url("/flights"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let all: Value = server.get("/flights").await.json().await.unwrap();
    assert_eq!(all, json!([]));

    server.stop().await;
}

#[tokio::test]
async fn test_servers_do_not_share_state() {
    let first = TestServer::start().await;
    let second = TestServer::start().await;

    first.post(&json!({"id": 1})).await;

    let other: Value = second.get("/flights").await.json().await.unwrap();
    assert_eq!(other, json!([]));

    first.stop().await;
    second.stop().await;
}
