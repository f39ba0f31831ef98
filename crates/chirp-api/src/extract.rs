use axum::extract::FromRequest;

use crate::error::AppError;

/// `Json` whose rejections (bad syntax, wrong shape, missing content type)
/// answer 400 through `AppError` instead of axum's 415/422.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
