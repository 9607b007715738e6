//! Integration tests for the REST API.
//!
//! Drives the wired router with `tower::ServiceExt::oneshot` over the
//! in-memory adapters.

use std::sync::Arc;

use axum::body::Body;
use axum::Router;
use http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use coop_assembly::adapters::memory::{
    InMemoryMessageSink, InMemoryStore, StaticEligibilityChecker,
};
use coop_assembly::app::{Application, Stores};
use coop_assembly::config::AppConfig;
use coop_assembly::domain::foundation::MemberId;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn app_denying(members: &[&str]) -> Application {
    let denied = members.iter().map(|m| MemberId::new(*m).unwrap());
    Application::from_parts(
        &AppConfig::default(),
        Stores::in_memory(InMemoryStore::new()),
        Arc::new(InMemoryMessageSink::new()),
        Arc::new(StaticEligibilityChecker::denying(denied)),
    )
    .unwrap()
}

fn router() -> Router {
    app_denying(&[]).router()
}

async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(match body {
            Some(body) => Body::from(body.to_string()),
            None => Body::empty(),
        })
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn create_agenda(router: &Router, title: &str) -> String {
    let request = json!({ "title": title });
    let (status, body) = send(router, "POST", "/api/agendas", Some(request)).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

async fn open_session(router: &Router, agenda_id: &str) -> String {
    let (status, body) = send(
        router,
        "POST",
        "/api/sessions",
        Some(json!({ "agendaId": agenda_id, "deadlineMinutes": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

async fn vote(
    router: &Router,
    session_id: &str,
    member: &str,
    choice: &str,
) -> (StatusCode, Value) {
    send(
        router,
        "POST",
        "/api/votes",
        Some(json!({ "memberId": member, "sessionId": session_id, "choice": choice })),
    )
    .await
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn health_check_responds() {
    let (status, body) = send(&router(), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn agenda_round_trip() {
    let router = router();
    let id = create_agenda(&router, "Board Election").await;

    let (status, body) = send(&router, "GET", &format!("/api/agendas/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Board Election");
}

#[tokio::test]
async fn blank_agenda_title_is_unprocessable() {
    let request = json!({ "title": "  " });
    let (status, body) = send(&router(), "POST", "/api/agendas", Some(request)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn unknown_agenda_is_not_found() {
    let (status, body) = send(
        &router(),
        "GET",
        "/api/agendas/00000000-0000-0000-0000-000000000000",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "AGENDA_NOT_FOUND");
}

#[tokio::test]
async fn malformed_id_is_bad_request() {
    let (status, body) = send(&router(), "GET", "/api/sessions/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn session_is_open_and_unique_per_agenda() {
    let router = router();
    let agenda_id = create_agenda(&router, "Budget").await;
    let session_id = open_session(&router, &agenda_id).await;

    let (status, body) = send(&router, "GET", &format!("/api/sessions/{}", session_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OPEN");
    assert_eq!(body["published"], false);
    assert_eq!(body["agenda"]["title"], "Budget");

    let (status, body) = send(
        &router,
        "POST",
        "/api/sessions",
        Some(json!({ "agendaId": agenda_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "SESSION_ALREADY_OPEN");
}

#[tokio::test]
async fn zero_deadline_is_unprocessable() {
    let router = router();
    let agenda_id = create_agenda(&router, "Zero").await;

    let (status, _) = send(
        &router,
        "POST",
        "/api/sessions",
        Some(json!({ "agendaId": agenda_id, "deadlineMinutes": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn votes_and_tally_over_http() {
    let router = router();
    let agenda_id = create_agenda(&router, "Board Election").await;
    let session_id = open_session(&router, &agenda_id).await;

    let (status, body) = vote(&router, &session_id, "A", "YES").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["memberId"], "A");
    assert_eq!(body["choice"], "YES");
    assert_eq!(body["session"]["agendaId"], agenda_id.as_str());

    let (status, _) = vote(&router, &session_id, "B", "NO").await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = vote(&router, &session_id, "A", "NO").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "ALREADY_VOTED");

    let tally_uri = format!("/api/agendas/{}/tally", agenda_id);
    let (status, body) = send(&router, "GET", &tally_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalVotes"], 2);
    assert_eq!(body["affirmativeVotes"], 1);
    assert_eq!(body["negativeVotes"], 1);
    assert_eq!(body["outcome"], "REJECTED");
}

#[tokio::test]
async fn ineligible_member_is_unprocessable() {
    let router = app_denying(&["outsider"]).router();
    let agenda_id = create_agenda(&router, "Members only").await;
    let session_id = open_session(&router, &agenda_id).await;

    let (status, body) = vote(&router, &session_id, "outsider", "YES").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "MEMBER_INELIGIBLE");
}

#[tokio::test]
async fn vote_in_unknown_session_is_not_found() {
    let (status, body) = vote(
        &router(),
        "00000000-0000-0000-0000-000000000000",
        "A",
        "YES",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "SESSION_NOT_FOUND");
}

#[tokio::test]
async fn tally_without_session_is_not_found() {
    let router = router();
    let agenda_id = create_agenda(&router, "No session").await;

    let tally_uri = format!("/api/agendas/{}/tally", agenda_id);
    let (status, body) = send(&router, "GET", &tally_uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "SESSION_NOT_FOUND");
}
