//! Shared harness for the HTTP tests: runs the real router on an ephemeral
//! port and hands back a client pointed at it.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use blog_server::{AppState, ServerConfig, build_app};
use blog_store::{BlogStore, MemoryStore};
use reqwest::{Client, Response, StatusCode};
use serde_json::{Value, json};
use tokio::net::TcpListener;

/// A running server plus direct access to its store.
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub store: Arc<dyn BlogStore>,
}

impl TestServer {
    /// Start a server backed by a fresh in-memory store.
    pub async fn start() -> Self {
        Self::with_store(Arc::new(MemoryStore::new())).await
    }

    /// Start a server backed by the given store.
    pub async fn with_store(store: Arc<dyn BlogStore>) -> Self {
        let app = build_app(AppState::new(store.clone(), ServerConfig::default()))
            .expect("build app");

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });

        Self {
            addr,
            client: Client::new(),
            store,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> Response {
        self.client.get(self.url(path)).send().await.expect("GET")
    }

    pub async fn post(&self, path: &str, body: &Value) -> Response {
        self.client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("POST")
    }

    pub async fn put(&self, path: &str, body: &Value) -> Response {
        self.client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("PUT")
    }

    pub async fn delete(&self, path: &str) -> Response {
        self.client
            .delete(self.url(path))
            .send()
            .await
            .expect("DELETE")
    }

    /// POST an author and return the created JSON.
    pub async fn create_author(&self, first: &str, last: &str, user_name: &str) -> Value {
        let response = self
            .post(
                "/authors",
                &json!({ "firstName": first, "lastName": last, "userName": user_name }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        response.json().await.expect("author json")
    }

    /// POST a post and return the created JSON.
    pub async fn create_post(&self, author_id: &str, title: &str) -> Value {
        let response = self
            .post(
                "/posts",
                &json!({ "title": title, "content": "Some words", "authorId": author_id }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        response.json().await.expect("post json")
    }
}

/// Extract a string field from a JSON value.
pub fn field<'a>(value: &'a Value, name: &str) -> &'a str {
    value[name].as_str().unwrap_or_else(|| panic!("missing `{name}` in {value}"))
}
