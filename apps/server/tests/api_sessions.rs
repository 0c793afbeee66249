//! Quiz session API tests.

mod common;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::Value;

use common::{fixtures, guess, start_session, TestContext};

/// Test creating a session serves the first item.
#[tokio::test]
async fn test_create_session() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/sessions")
        .json(&fixtures::create_session("europe", "big", 1))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();

    let item = body["item"]["id"].as_str().unwrap();
    assert!(item == "France" || item == "Germany");
    assert_eq!(body["progress"]["total"], 2);
    assert_eq!(body["progress"]["introduced"], 1);
    assert_eq!(body["false_guesses"], 0);
    assert_eq!(ctx.state.sessions.len(), 1);
}

/// Test the response never carries the accepted names of the item.
#[tokio::test]
async fn test_create_session_hides_answers() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/sessions")
        .json(&fixtures::create_session("europe", "big", 2))
        .await;
    let body: Value = response.json();

    assert!(body["item"].get("names").is_none());
    assert!(body["item"].get("aliases").is_none());
}

/// Test the same seed gives the same first item.
#[tokio::test]
async fn test_seed_fixes_order() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let (_, first) = start_session(&server, "europe", "all").await;
    let (_, second) = start_session(&server, "europe", "all").await;

    assert_eq!(first, second);
}

/// Test unknown region is rejected.
#[tokio::test]
async fn test_create_session_unknown_region() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/sessions")
        .json(&fixtures::create_session("atlantis", "all", 1))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "bad_request");
    assert_eq!(body["message"], "Bad request: unknown region: atlantis");
}

/// Test an empty selection starts a finished session.
#[tokio::test]
async fn test_empty_selection_is_finished() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/sessions")
        .json(&fixtures::create_session("africa", "big", 1))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body["item"].is_null());
    assert_eq!(body["progress"]["total"], 0);

    let id = body["session_id"].as_str().unwrap();
    let response = server
        .post(&format!("/api/sessions/{}/guess", id))
        .json(&fixtures::guess("Chad"))
        .await;
    response.assert_status(StatusCode::GONE);
}

/// Test a correct guess moves to the next item.
#[tokio::test]
async fn test_correct_guess_advances() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let (id, item) = start_session(&server, "europe", "all").await;

    let body = guess(&server, &id, &item.to_lowercase()).await;

    assert_eq!(body["feedback"]["kind"], "correct");
    assert_eq!(body["feedback"]["segments"][0]["text"], format!("{} is correct!", item));
    assert_eq!(body["next"]["status"], "item");
    assert_ne!(body["next"]["item"]["id"], item.as_str());
    assert_eq!(body["stats"]["first_try"], 1);
}

/// Test wrong guesses keep the item and escalate the hint.
#[tokio::test]
async fn test_wrong_guess_gives_hints() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let (id, item) = start_session(&server, "europe", "all").await;

    let body = guess(&server, &id, "Atlantis").await;
    assert_eq!(body["feedback"]["kind"], "wrong");
    assert_eq!(body["next"]["status"], "retry");
    assert_eq!(body["next"]["item"]["id"], item.as_str());
    let hint = body["feedback"]["segments"][0]["text"].as_str().unwrap();
    assert!(hint.starts_with("Hint: "));

    let body = guess(&server, &id, "Atlantis").await;
    let reveal = body["feedback"]["segments"][0]["text"].as_str().unwrap();
    assert!(reveal.contains(&item));

    let response = server.get(&format!("/api/sessions/{}", id)).await;
    response.assert_status_ok();
    let state: Value = response.json();
    assert_eq!(state["false_guesses"], 2);
    assert_eq!(state["item"]["id"], item.as_str());
}

/// Test a typo is flagged with diff segments and does not count as wrong.
#[tokio::test]
async fn test_misspelled_guess() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let (id, item) = start_session(&server, "europe", "all").await;

    let typo = &item[..item.len() - 1];
    let body = guess(&server, &id, typo).await;

    assert_eq!(body["feedback"]["kind"], "misspelled");
    assert_eq!(body["next"]["status"], "retry");
    let segments = body["feedback"]["segments"].as_array().unwrap();
    assert!(segments.iter().any(|s| s["tag"] == "deleted"));
    assert_eq!(body["stats"]["wrong_guesses"], 0);
}

/// Test a known alias is distinguished from a wrong answer.
#[tokio::test]
async fn test_alias_guess() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let (id, mut item) = start_session(&server, "europe", "all").await;

    // France and Spain both have an alias; answer until one comes up
    while item != "France" && item != "Spain" {
        let body = guess(&server, &id, &item).await;
        item = body["next"]["item"]["id"].as_str().unwrap().to_string();
    }
    let alias = if item == "France" { "Gaul" } else { "Hispania" };

    let body = guess(&server, &id, alias).await;
    assert_eq!(body["feedback"]["kind"], "alias");
    assert_eq!(body["next"]["status"], "retry");
    assert_eq!(body["next"]["item"]["id"], item.as_str());
    assert_eq!(body["stats"]["near_misses"], 1);
}

/// Test answering everything correctly finishes the session.
#[tokio::test]
async fn test_session_runs_to_completion() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let (id, mut item) = start_session(&server, "europe", "all").await;

    let mut turns = 0;
    loop {
        let body = guess(&server, &id, &item).await;
        turns += 1;
        match body["next"]["status"].as_str().unwrap() {
            "item" => item = body["next"]["item"]["id"].as_str().unwrap().to_string(),
            "done" => break,
            other => panic!("unexpected status {}", other),
        }
        assert!(turns < 100);
    }
    assert_eq!(turns, 4);

    let response = server
        .post(&format!("/api/sessions/{}/guess", id))
        .json(&fixtures::guess("France"))
        .await;
    response.assert_status(StatusCode::GONE);
    let body: Value = response.json();
    assert_eq!(body["error"], "session_finished");
}

/// Test a missed item comes back before the session ends.
#[tokio::test]
async fn test_missed_item_is_retested() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let (id, first) = start_session(&server, "europe", "all").await;

    guess(&server, &id, "Atlantis").await;
    let mut body = guess(&server, &id, &first).await;
    assert_eq!(body["progress"]["pending_retests"], 1);

    let mut seen_again = false;
    while body["next"]["status"] == "item" {
        let item = body["next"]["item"]["id"].as_str().unwrap().to_string();
        seen_again |= item == first;
        body = guess(&server, &id, &item).await;
    }
    assert!(seen_again);
    assert_eq!(body["next"]["status"], "done");
}

/// Test unknown session ids return not found.
#[tokio::test]
async fn test_unknown_session() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let missing = uuid::Uuid::new_v4();

    let response = server.get(&format!("/api/sessions/{}", missing)).await;
    response.assert_status(StatusCode::NOT_FOUND);

    let response = server
        .post(&format!("/api/sessions/{}/guess", missing))
        .json(&fixtures::guess("France"))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

/// Test deleting a session.
#[tokio::test]
async fn test_delete_session() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let (id, _) = start_session(&server, "europe", "big").await;

    let response = server.delete(&format!("/api/sessions/{}", id)).await;
    response.assert_status(StatusCode::NO_CONTENT);
    assert!(ctx.state.sessions.is_empty());

    let response = server.delete(&format!("/api/sessions/{}", id)).await;
    response.assert_status(StatusCode::NOT_FOUND);
}
