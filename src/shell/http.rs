use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;

use crate::modules::examples::commands::ExampleCommand;
use crate::modules::examples::use_cases::get_example::inbound::http as get_example_http;
use crate::modules::examples::use_cases::increment_counter::inbound::http as increment_counter_http;
use crate::modules::examples::use_cases::open_example::inbound::http as open_example_http;
use crate::shared::application::application_service::ApplicationError;
use crate::shell::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/examples/{id}", get(get_example_http::handle))
        .route("/examples/{id}/open", post(open_example_http::handle))
        .route(
            "/examples/{id}/counters/{counter}/increment",
            post(increment_counter_http::handle),
        )
        .route("/commands", post(enqueue_command))
        .with_state(state)
}

/// 200 with the new stream version.
pub fn version_response(version: u64) -> Response {
    (StatusCode::OK, Json(json!({ "version": version }))).into_response()
}

/// Maps a failed command to its HTTP answer: 422 for domain rejections, 409 for lost
/// concurrency races, 500 for everything else.
pub fn error_response(error: ApplicationError) -> Response {
    if let Some((expected, actual)) = error.as_concurrency_conflict() {
        return (
            StatusCode::CONFLICT,
            Json(json!({
                "error": "concurrency-conflict",
                "expected": expected,
                "actual": actual,
            })),
        )
            .into_response();
    }
    match error {
        ApplicationError::Domain(error) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": error.name, "message": error.message })),
        )
            .into_response(),
        error => {
            tracing::error!(%error, "command failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn enqueue_command(
    State(state): State<AppState>,
    body: Result<Json<ExampleCommand>, JsonRejection>,
) -> impl IntoResponse {
    let Json(command) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };
    match state.commands.enqueue(command) {
        Ok(()) => StatusCode::ACCEPTED.into_response(),
        Err(error) => {
            tracing::error!(%error, "command not enqueued");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
