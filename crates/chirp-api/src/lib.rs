pub mod auth;
pub mod error;
pub mod extract;
pub mod messages;
pub mod router;
pub mod service;

pub use auth::{AppState, AppStateInner};
pub use error::{AppError, AppResult};
