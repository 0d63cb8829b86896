use crate::assets;
use crate::errors::AppError;
use crate::models::{ItemRequest, ItemSelector, NewTodoForm};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse, Redirect},
    Form, Json,
};
use tracing::{debug, info};

pub const MARKED_COMPLETE: &str = "Marked Complete";
pub const MARKED_UNCOMPLETE: &str = "Marked Uncomplete";
pub const TODO_DELETED: &str = "Todo Deleted";

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let snapshot = state.store.snapshot().await.map_err(AppError::store("list"))?;
    Ok(Html(render_index(&snapshot.items, snapshot.left)))
}

pub async fn add_todo(
    State(state): State<AppState>,
    Form(form): Form<NewTodoForm>,
) -> Result<Redirect, AppError> {
    let item = state
        .store
        .insert(form.text)
        .await
        .map_err(AppError::store("insert"))?;
    info!(id = %item.id, "Todo Added");
    Ok(Redirect::to("/"))
}

pub async fn mark_complete(
    State(state): State<AppState>,
    Json(payload): Json<ItemRequest>,
) -> Result<Json<&'static str>, AppError> {
    set_completed(&state, payload, true).await?;
    info!("{MARKED_COMPLETE}");
    Ok(Json(MARKED_COMPLETE))
}

pub async fn mark_uncomplete(
    State(state): State<AppState>,
    Json(payload): Json<ItemRequest>,
) -> Result<Json<&'static str>, AppError> {
    set_completed(&state, payload, false).await?;
    info!("{MARKED_UNCOMPLETE}");
    Ok(Json(MARKED_UNCOMPLETE))
}

pub async fn delete_item(
    State(state): State<AppState>,
    Json(payload): Json<ItemRequest>,
) -> Result<Json<&'static str>, AppError> {
    let selector = require_selector(payload)?;
    let removed = state
        .store
        .delete(&selector)
        .await
        .map_err(AppError::store("delete"))?;
    if removed.is_none() {
        debug!(?selector, "delete matched no item");
    }
    info!("{TODO_DELETED}");
    Ok(Json(TODO_DELETED))
}

pub async fn main_js() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/javascript; charset=utf-8")], assets::MAIN_JS)
}

pub async fn style_css() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], assets::STYLE_CSS)
}

async fn set_completed(state: &AppState, payload: ItemRequest, completed: bool) -> Result<(), AppError> {
    let selector = require_selector(payload)?;
    let updated = state
        .store
        .set_completed(&selector, completed)
        .await
        .map_err(AppError::store("set_completed"))?;
    if updated.is_none() {
        debug!(?selector, completed, "update matched no item");
    }
    Ok(())
}

fn require_selector(payload: ItemRequest) -> Result<ItemSelector, AppError> {
    payload
        .selector()
        .ok_or_else(|| AppError::bad_request("itemFromJS or id is required"))
}
