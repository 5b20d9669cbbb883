use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::modules::examples::core::identity::ExampleId;
use crate::shell::http::error_response;
use crate::shell::state::AppState;

#[derive(Serialize)]
pub struct ExampleView {
    pub id: u64,
    pub opened: bool,
    pub counters: BTreeMap<String, i64>,
    pub version: u64,
}

pub async fn handle(State(state): State<AppState>, Path(id): Path<u64>) -> impl IntoResponse {
    match state.examples.load(ExampleId(id)).await {
        Ok(example) => Json(ExampleView {
            id,
            opened: example.state().is_opened(),
            counters: example.state().counters.clone(),
            version: example.version(),
        })
        .into_response(),
        Err(error) => error_response(error),
    }
}
