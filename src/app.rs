use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{delete, get, post, put},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/addTodo", post(handlers::add_todo))
        .route("/markComplete", put(handlers::mark_complete))
        .route("/markUnComplete", put(handlers::mark_uncomplete))
        .route("/deleteItem", delete(handlers::delete_item))
        .route("/js/main.js", get(handlers::main_js))
        .route("/css/style.css", get(handlers::style_css))
        .with_state(state)
}
