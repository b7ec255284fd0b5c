use axum::{
    Router,
    routing::{get, patch, post, put},
};

use friendlytask_core::health::{healthz, readyz};
use friendlytask_core::middleware::request_id_layer;

use crate::handlers::{
    account::{get_me, login, register, update_settings, upload_picture},
    task::{add_task, complete_task, get_my_day, start_task},
    tip::{add_comment, get_tip, list_tips, post_tip, toggle_like},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Accounts
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/users/@me", get(get_me))
        .route("/users/@me/settings", patch(update_settings))
        .route("/users/@me/picture", put(upload_picture))
        // Task ledger
        .route("/my-day", get(get_my_day))
        .route("/tasks", post(add_task))
        .route("/tasks/{id}/start", post(start_task))
        .route("/tasks/{id}/complete", post(complete_task))
        // Tip board
        .route("/tips", get(list_tips))
        .route("/tips", post(post_tip))
        .route("/tips/{id}", get(get_tip))
        .route("/tips/{id}/comments", post(add_comment))
        .route("/tips/{id}/like", put(toggle_like))
        .layer(request_id_layer())
        .with_state(state)
}
