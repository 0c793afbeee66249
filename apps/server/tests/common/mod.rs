//! Common test utilities for integration tests.
//!
//! The catalog is built from the fixtures in memory, so no files or
//! environment are needed.

pub mod fixtures;

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;
use quiz_core::{Catalog, MatchSettings, SchedulerConfig};
use serde_json::Value;

use mapquiz_server::services::sessions::SessionStore;
use mapquiz_server::AppState;

/// Test context holding the shared state and router.
pub struct TestContext {
    pub state: AppState,
    app: Router,
}

impl TestContext {
    pub fn new() -> Self {
        let catalog = Catalog::from_json(fixtures::ITEMS_JSON, fixtures::GROUPS_JSON)
            .expect("fixture catalog should parse");

        let state = AppState {
            catalog: Arc::new(catalog),
            sessions: Arc::new(SessionStore::new(chrono::Duration::minutes(60))),
            scheduler: SchedulerConfig::default(),
            matching: MatchSettings::default(),
        };
        let app = mapquiz_server::app(state.clone());

        Self { state, app }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).expect("failed to start test server")
    }
}

/// Start a seeded session and return its id and first item.
pub async fn start_session(server: &TestServer, region: &str, list: &str) -> (String, String) {
    let response = server
        .post("/api/sessions")
        .json(&fixtures::create_session(region, list, 7))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let id = body["session_id"].as_str().unwrap().to_string();
    let item = body["item"]["id"].as_str().unwrap().to_string();
    (id, item)
}

/// Submit a guess and return the response body.
pub async fn guess(server: &TestServer, session_id: &str, text: &str) -> Value {
    let response = server
        .post(&format!("/api/sessions/{}/guess", session_id))
        .json(&fixtures::guess(text))
        .await;
    response.assert_status_ok();
    response.json()
}
