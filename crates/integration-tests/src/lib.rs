//! Black-box tests for the hotel booking API.
//!
//! Each test spawns the production router on an ephemeral port, backed by
//! the in-memory store, and talks to it over HTTP with `reqwest`.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p hotel-booking-integration-tests
//! ```
//!
//! No database is needed.

use std::sync::Arc;

use reqwest::{Client, Response, StatusCode};
use serde_json::{Value, json};

use hotel_booking_api::db::MemoryStore;
use hotel_booking_api::{ApiConfig, AppState, build_router};

/// Password used for every test account.
pub const PASSWORD: &str = "password123";

/// A running server with its own empty store.
pub struct TestServer {
    pub base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Start a server on `127.0.0.1:0`.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn spawn() -> Self {
        let state = AppState::new(ApiConfig::in_memory(), Arc::new(MemoryStore::new()));
        let app = build_router(state, tower_sessions::MemoryStore::default());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().expect("listener has no address");
        let base_url = format!("http://{addr}");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("server error");
        });

        Self { base_url, handle }
    }

    /// Absolute URL for a path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Register an account and return Basic credentials for it.
    ///
    /// # Panics
    ///
    /// Panics if registration does not return `201`.
    pub async fn register(&self, email: &str) -> TestUser {
        let response = Client::new()
            .post(self.url("/register/"))
            .json(&json!({
                "email": email,
                "first_name": "John",
                "last_name": "Doe",
                "password": PASSWORD,
            }))
            .send()
            .await
            .expect("register request failed");
        assert_eq!(response.status(), StatusCode::CREATED);

        TestUser {
            email: email.to_owned(),
            password: PASSWORD.to_owned(),
        }
    }

    /// Create a hotel as `user` and return its representation.
    ///
    /// # Panics
    ///
    /// Panics if creation does not return `201`.
    pub async fn create_hotel(&self, user: &TestUser, name: &str) -> Value {
        let response = user
            .post(self, "/hotels/", &json!({"name": name, "address": "Main St 1"}))
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        response.json().await.expect("hotel body is not JSON")
    }

    /// Create a room in `hotel` as `user` and return its representation.
    ///
    /// # Panics
    ///
    /// Panics if creation does not return `201`.
    pub async fn create_room(&self, user: &TestUser, hotel: &Value) -> Value {
        let response = user
            .post(
                self,
                "/rooms/",
                &json!({
                    "hotel": hotel["id"],
                    "room_number": "101",
                    "room_type": "Single",
                    "price_per_night": "100.00",
                }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        response.json().await.expect("room body is not JSON")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Credentials of a registered account, sent as HTTP Basic auth.
#[derive(Debug, Clone)]
pub struct TestUser {
    pub email: String,
    pub password: String,
}

impl TestUser {
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn get(&self, server: &TestServer, path: &str) -> Response {
        Client::new()
            .get(server.url(path))
            .basic_auth(&self.email, Some(&self.password))
            .send()
            .await
            .expect("GET request failed")
    }

    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn post(&self, server: &TestServer, path: &str, body: &Value) -> Response {
        Client::new()
            .post(server.url(path))
            .basic_auth(&self.email, Some(&self.password))
            .json(body)
            .send()
            .await
            .expect("POST request failed")
    }

    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn put(&self, server: &TestServer, path: &str, body: &Value) -> Response {
        Client::new()
            .put(server.url(path))
            .basic_auth(&self.email, Some(&self.password))
            .json(body)
            .send()
            .await
            .expect("PUT request failed")
    }

    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn patch(&self, server: &TestServer, path: &str, body: &Value) -> Response {
        Client::new()
            .patch(server.url(path))
            .basic_auth(&self.email, Some(&self.password))
            .json(body)
            .send()
            .await
            .expect("PATCH request failed")
    }

    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn delete(&self, server: &TestServer, path: &str) -> Response {
        Client::new()
            .delete(server.url(path))
            .basic_auth(&self.email, Some(&self.password))
            .send()
            .await
            .expect("DELETE request failed")
    }
}
