use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

use event_sourcing::shared::infrastructure::conflict_detector::ConflictPolicy;
use event_sourcing::shared::infrastructure::event_persistence::in_memory::InMemoryEventPersistence;
use event_sourcing::shell::composition::{Composition, compose};
use event_sourcing::shell::http::router;

fn composition(policy: ConflictPolicy) -> (Router, Composition) {
    let composition = compose(Arc::new(InMemoryEventPersistence::new()), policy).unwrap();
    (router(composition.state.clone()), composition)
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn get_json(app: &Router, uri: &str) -> serde_json::Value {
    let response = app
        .clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn it_should_accept_queued_commands_and_apply_them_once_the_host_drains() {
    let (app, Composition { mut host, .. }) = composition(ConflictPolicy::AssumeConflict);
    host.start().unwrap();

    for body in [
        r#"{"type":"OpenExample","id":7,"opened_at":1700000000000}"#,
        r#"{"type":"IncrementCounter","id":7,"counter":"visits","by":3}"#,
        r#"{"type":"IncrementCounter","id":7,"counter":"visits","by":4,"expected_version":1}"#,
    ] {
        let response = app.clone().oneshot(post_json("/commands", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
    }
    host.stop().await.unwrap();

    let example = get_json(&app, "/examples/7").await;
    assert_eq!(example["opened"], true);
    assert_eq!(example["counters"]["visits"], 7);
    assert_eq!(example["version"], 3);
}

#[tokio::test]
async fn it_should_reject_an_unknown_command_type() {
    let (app, _composition) = composition(ConflictPolicy::AssumeConflict);
    let response = app
        .oneshot(post_json("/commands", r#"{"type":"CloseExample","id":1}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn it_should_reject_a_second_open_regardless_of_the_fallback_policy() {
    let (app, _composition) = composition(ConflictPolicy::AssumeNoConflict);
    let first = app
        .clone()
        .oneshot(post_json("/examples/1/open", r#"{"expected_version":0}"#))
        .await
        .unwrap();
    let second = app
        .clone()
        .oneshot(post_json("/examples/1/open", r#"{"expected_version":0}"#))
        .await
        .unwrap();

    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(second.status(), StatusCode::CONFLICT);
    assert_eq!(get_json(&app, "/examples/1").await["version"], 1);
}
