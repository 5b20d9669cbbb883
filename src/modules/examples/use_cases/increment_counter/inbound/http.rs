use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use crate::modules::examples::commands::ExampleCommand;
use crate::modules::examples::core::identity::ExampleId;
use crate::modules::examples::use_cases::increment_counter::command::IncrementCounter;
use crate::shared::application::application_service::ApplicationService;
use crate::shell::http::{error_response, version_response};
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct IncrementCounterBody {
    pub by: i64,
    pub expected_version: Option<u64>,
}

pub async fn handle(
    State(state): State<AppState>,
    Path((id, counter)): Path<(u64, String)>,
    body: Result<Json<IncrementCounterBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    let command = IncrementCounter {
        id: ExampleId(id),
        counter,
        by: body.by,
        expected_version: body.expected_version,
    };

    match state
        .examples
        .execute(ExampleCommand::IncrementCounter(command))
        .await
    {
        Ok(version) => version_response(version),
        Err(error) => error_response(error),
    }
}

#[cfg(test)]
mod increment_counter_http_inbound_tests {
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::post,
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::modules::examples::use_cases::open_example::inbound::http as open_http;
    use crate::shell::composition::in_memory_state;
    use crate::shell::state::AppState;

    use super::handle;

    fn app(state: AppState) -> Router {
        Router::new()
            .route("/examples/{id}/open", post(open_http::handle))
            .route("/examples/{id}/counters/{counter}/increment", post(handle))
            .with_state(state)
    }

    fn post_json(uri: &str, body: &'static str) -> Request<Body> {
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn it_should_merge_increments_sent_against_the_same_version() {
        let app = app(in_memory_state());
        app.clone()
            .oneshot(post_json("/examples/1/open", "{}"))
            .await
            .unwrap();
        let first = app
            .clone()
            .oneshot(post_json(
                "/examples/1/counters/b/increment",
                r#"{"by":1,"expected_version":1}"#,
            ))
            .await
            .unwrap();
        let second = app
            .oneshot(post_json(
                "/examples/1/counters/a/increment",
                r#"{"by":1,"expected_version":1}"#,
            ))
            .await
            .unwrap();

        assert_eq!(first.status(), StatusCode::OK);
        assert_eq!(second.status(), StatusCode::OK);
        assert_eq!(json_body(second).await["version"], 3);
    }

    #[tokio::test]
    async fn it_should_return_422_when_the_example_is_not_opened() {
        let response = app(in_memory_state())
            .oneshot(post_json("/examples/1/counters/a/increment", r#"{"by":1}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json_body(response).await["error"], "example-not-opened");
    }

    #[tokio::test]
    async fn it_should_return_422_when_by_is_missing() {
        let response = app(in_memory_state())
            .oneshot(post_json("/examples/1/counters/a/increment", "{}"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
