use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use serde::Deserialize;

use crate::modules::examples::commands::ExampleCommand;
use crate::modules::examples::core::identity::ExampleId;
use crate::modules::examples::use_cases::open_example::command::OpenExample;
use crate::shared::application::application_service::ApplicationService;
use crate::shell::http::{error_response, version_response};
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct OpenExampleBody {
    pub expected_version: Option<u64>,
}

pub async fn handle(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    body: Result<Json<OpenExampleBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    let command = OpenExample {
        id: ExampleId(id),
        opened_at: Utc::now().timestamp_millis(),
        expected_version: body.expected_version,
    };

    match state
        .examples
        .execute(ExampleCommand::OpenExample(command))
        .await
    {
        Ok(version) => version_response(version),
        Err(error) => error_response(error),
    }
}
