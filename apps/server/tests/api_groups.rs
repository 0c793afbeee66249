//! Group listing and health API tests.

mod common;

use common::TestContext;

/// Test health check responds.
#[tokio::test]
async fn test_health() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    response.assert_text("OK");
}

/// Test groups lists regions and lists with askable sizes.
#[tokio::test]
async fn test_list_groups() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/api/groups").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();

    let regions = body["regions"].as_array().unwrap();
    assert_eq!(regions.len(), 2);
    assert_eq!(regions[0]["name"], "europe");
    assert_eq!(regions[0]["display_name"], "Europe");
    // Atlantis is inactive and not counted
    assert_eq!(regions[0]["size"], 4);

    let lists = body["lists"].as_array().unwrap();
    assert_eq!(lists[1]["name"], "big");
    assert_eq!(lists[1]["size"], 2);
}
