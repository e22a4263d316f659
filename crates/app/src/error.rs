use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use serde_json::json;
use services::StoryError;
use storybook_core::model::LetterError;
use thiserror::Error;
use tracing::error;

/// Failures surfaced by HTTP handlers.
///
/// Guard failures become redirects, letter validation a 422 and anything
/// else a 500.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Story(#[from] StoryError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let AppError::Story(err) = self;
        if err.is_guard() {
            return Redirect::to("/map").into_response();
        }
        match err {
            StoryError::Letter(LetterError::NotSubmitted) => Redirect::to("/letter").into_response(),
            StoryError::Letter(LetterError::MissingFields(fields)) => {
                let missing: Vec<&str> = fields.iter().map(|field| field.as_str()).collect();
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({
                        "error": "Please fill in all required fields.",
                        "missing": missing,
                    })),
                )
                    .into_response()
            }
            other => {
                error!(error = %other, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": other.to_string() })),
                )
                    .into_response()
            }
        }
    }
}
