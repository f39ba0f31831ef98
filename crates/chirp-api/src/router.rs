use axum::{
    Router,
    routing::{get, post},
};

use crate::auth::{self, AppState};
use crate::messages;

pub fn build(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route(
            "/messages",
            get(messages::get_messages).post(messages::create_message),
        )
        .route(
            "/messages/{message_id}",
            get(messages::get_message)
                .delete(messages::delete_message)
                .patch(messages::update_message),
        )
        .route(
            "/accounts/{account_id}/messages",
            get(messages::get_account_messages),
        )
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
