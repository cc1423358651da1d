//! Login, logout, health, and changelog handlers.

use axum::{
  extract::{Query, State},
  http::{HeaderValue, header},
  response::{Html, IntoResponse, Redirect, Response},
};
use nook_auth::{CurrentUser, clear_session_cookie, session_cookie, verify_credentials};
use nook_core::changelog::load_changelog;
use nook_web::changelog::{changelog_content, changelog_unavailable};
use serde::Deserialize;

use crate::{AppState, error::AppError, shell};

#[derive(Deserialize)]
pub struct LoginQuery {
  pub error: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginForm {
  pub username: String,
  pub password: String,
}

pub async fn login_page(
  State(state): State<AppState>,
  Query(query): Query<LoginQuery>,
) -> Html<String> {
  nook_web::login_page(&state.config.app_name, query.error.as_deref())
}

pub async fn login(
  State(state): State<AppState>,
  axum::Form(form): axum::Form<LoginForm>,
) -> Result<Response, AppError> {
  if verify_credentials(&state.roster, &form.username, &form.password).is_err() {
    return Ok(Redirect::to("/login?error=Invalid%20credentials").into_response());
  }

  let token = state.tokens.generate(&form.username)?;
  tracing::info!(username = %form.username, "login");

  let mut response = Redirect::to("/").into_response();
  response.headers_mut().insert(
    header::SET_COOKIE,
    HeaderValue::from_str(&session_cookie(&token))
      .map_err(|e| AppError::BadRequest(e.to_string()))?,
  );
  Ok(response)
}

pub async fn logout() -> Response {
  let mut response = Redirect::to("/login").into_response();
  if let Ok(cookie) = HeaderValue::from_str(&clear_session_cookie()) {
    response.headers_mut().insert(header::SET_COOKIE, cookie);
  }
  response
}

pub async fn health() -> &'static str {
  "OK"
}

/// Public page; greets the user when a valid session is present.
pub async fn changelog(
  State(state): State<AppState>,
  user: Option<CurrentUser>,
) -> Html<String> {
  let content = match load_changelog(&state.config.changelog_path) {
    Ok(entries) => changelog_content(&entries),
    Err(e) => {
      tracing::warn!(error = %e, "changelog unavailable");
      changelog_unavailable()
    }
  };

  let username = user.as_ref().map(|u| u.0.as_str());
  shell(&state.config).page("Changelog", username, &content)
}
