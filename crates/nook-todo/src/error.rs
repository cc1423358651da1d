//! Error type and HTTP mapping for the todo-list handlers.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("store error: {0}")]
  Db(#[from] nook_store_sqlite::Error),

  #[error("auth error: {0}")]
  Auth(#[from] nook_auth::Error),

  #[error("not found")]
  NotFound,

  #[error("bad request: {0}")]
  BadRequest(String),
}

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
    match self {
      AppError::NotFound => (StatusCode::NOT_FOUND, "Not Found").into_response(),
      AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
      AppError::Db(e) => {
        tracing::error!(error = %e, "database failure");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
      }
      AppError::Auth(e) => {
        tracing::error!(error = %e, "auth failure");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
      }
    }
  }
}
