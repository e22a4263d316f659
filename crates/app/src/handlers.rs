//! Route handlers. Each one opens the visit, runs a single story operation
//! and lets [`Visit::finish`] pick the response.

use axum::Json;
use axum::extract::{Form, Path, Query, State};
use axum::http::HeaderMap;
use axum::response::{Redirect, Response};
use serde::{Deserialize, Serialize};
use services::MapView;
use storybook_core::model::{LetterForm, ModuleId};

use crate::AppState;
use crate::error::AppError;
use crate::visit::Visit;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Debug, Serialize)]
pub struct IndexResponse {
    progress: u8,
    all_complete: bool,
    next_module: Option<ModuleId>,
}

pub async fn index(State(app): State<AppState>, headers: HeaderMap) -> Result<Response, AppError> {
    let mut visit = Visit::open(&app.story, &headers).await?;
    let outcome = app.story.map(&mut visit.record).await.map(|map| {
        Json(IndexResponse {
            progress: map.progress,
            all_complete: map.all_complete,
            next_module: map.next_module,
        })
    });
    Ok(visit.finish(outcome))
}

#[derive(Debug, Default, Deserialize)]
pub struct MapQuery {
    completed: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MapResponse {
    #[serde(flatten)]
    map: MapView,
    /// Module just finished, echoed from the `completed` query parameter.
    just_completed: Option<ModuleId>,
}

pub async fn map(
    State(app): State<AppState>,
    Query(query): Query<MapQuery>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let mut visit = Visit::open(&app.story, &headers).await?;
    let just_completed = query.completed.as_deref().and_then(ModuleId::resolve);
    let outcome = app
        .story
        .map(&mut visit.record)
        .await
        .map(|map| Json(MapResponse { map, just_completed }));
    Ok(visit.finish(outcome))
}

pub async fn module(
    State(app): State<AppState>,
    Path(name): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let mut visit = Visit::open(&app.story, &headers).await?;
    let outcome = app.story.enter_module(&mut visit.record, &name).await.map(Json);
    Ok(visit.finish(outcome))
}

pub async fn complete_module(
    State(app): State<AppState>,
    Path(name): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let mut visit = Visit::open(&app.story, &headers).await?;
    let outcome = app
        .story
        .complete_module(&mut visit.record, &name)
        .await
        .map(|view| Redirect::to(&format!("/map?completed={}", view.module.short_key())));
    Ok(visit.finish(outcome))
}

pub async fn finale(State(app): State<AppState>, headers: HeaderMap) -> Result<Response, AppError> {
    let mut visit = Visit::open(&app.story, &headers).await?;
    let outcome = app.story.finale(&mut visit.record).await.map(Json);
    Ok(visit.finish(outcome))
}

pub async fn reset(State(app): State<AppState>, headers: HeaderMap) -> Result<Response, AppError> {
    let mut visit = Visit::open(&app.story, &headers).await?;
    let outcome = app
        .story
        .reset(&mut visit.record)
        .await
        .map(|_| Redirect::to("/"));
    Ok(visit.finish(outcome))
}

pub async fn letter(State(app): State<AppState>, headers: HeaderMap) -> Result<Response, AppError> {
    let mut visit = Visit::open(&app.story, &headers).await?;
    let outcome = app.story.letter(&mut visit.record).await.map(Json);
    Ok(visit.finish(outcome))
}

pub async fn submit_letter(
    State(app): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<LetterForm>,
) -> Result<Response, AppError> {
    let mut visit = Visit::open(&app.story, &headers).await?;
    let outcome = app
        .story
        .submit_letter(&mut visit.record, form)
        .await
        .map(|_| Redirect::to("/letter/reply"));
    Ok(visit.finish(outcome))
}

pub async fn reply(State(app): State<AppState>, headers: HeaderMap) -> Result<Response, AppError> {
    let mut visit = Visit::open(&app.story, &headers).await?;
    let outcome = app.story.reply(&mut visit.record).await.map(Json);
    Ok(visit.finish(outcome))
}
