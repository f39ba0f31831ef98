use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};

use chirp_db::Database;
use chirp_types::api::Credentials;

use crate::error::{AppError, AppResult, run_blocking};
use crate::extract::ApiJson;
use crate::service::{AccountManager, MessageManager};

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub accounts: AccountManager<Database>,
    pub messages: MessageManager<Database>,
}

impl AppStateInner {
    pub fn new(db: Database) -> AppState {
        let db = Arc::new(db);
        let accounts = AccountManager::new(Arc::clone(&db));
        let messages = MessageManager::new(db, accounts.clone());
        Arc::new(Self { accounts, messages })
    }
}

/// POST /register
pub async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<Credentials>,
) -> AppResult<impl IntoResponse> {
    let account = run_blocking(move || state.accounts.register(&req)).await?;
    Ok(Json(account))
}

/// POST /login — no token is issued; the account itself is the answer.
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<Credentials>,
) -> AppResult<impl IntoResponse> {
    let account = run_blocking(move || state.accounts.authenticate(&req))
        .await?
        .ok_or(AppError::Unauthorized)?;
    Ok(Json(account))
}
