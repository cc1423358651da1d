//! The todo/shopping-list application.
//!
//! Stores (lists) and their items are Owned Records: every read and write is
//! filtered through the caller's visibility set, so members of a share group
//! see and edit each other's lists.

pub mod error;
pub mod handlers;
pub mod migrations;
pub mod queries;
pub mod render;

use std::sync::Arc;

use axum::{
  Router,
  extract::FromRef,
  http::HeaderName,
  response::{IntoResponse, Response},
  routing::{delete, get, post},
};
use nook_auth::Tokens;
use nook_core::{AppConfig, Roster};
use nook_store_sqlite::Db;
use nook_web::Shell;
use tower_http::trace::TraceLayer;

use handlers::{items, session, stores};

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState {
  pub db:     Db,
  pub roster: Arc<Roster>,
  pub tokens: Arc<Tokens>,
  pub config: Arc<AppConfig>,
}

impl FromRef<AppState> for Arc<Tokens> {
  fn from_ref(state: &AppState) -> Self {
    state.tokens.clone()
  }
}

pub(crate) fn shell(config: &AppConfig) -> Shell<'_> {
  Shell {
    app_name:         &config.app_name,
    app_version:      &config.app_version,
    app_release_date: &config.app_release_date,
  }
}

/// 200 response carrying an `HX-Redirect` header; HTMX reloads the page.
pub(crate) fn hx_redirect(to: &'static str) -> Response {
  [(HeaderName::from_static("hx-redirect"), to)].into_response()
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build the axum [`Router`] for the todo-list server.
///
/// Public routes: login, logout, health, changelog, stylesheet. Everything
/// else requires a valid session cookie via the `CurrentUser` extractor.
pub fn router(state: AppState) -> Router {
  Router::new()
    .route("/login", get(session::login_page).post(session::login))
    .route("/logout", post(session::logout))
    .route("/health", get(session::health))
    .route("/changelog", get(session::changelog))
    .route("/custom.css", get(nook_web::css_handler))
    .route("/", get(stores::home))
    .route("/stores/new", get(stores::new_store_form))
    .route("/stores", post(stores::create_store))
    .route("/stores/{id}", delete(stores::delete_store))
    .route("/stores/{id}/items", post(items::create_item))
    .route("/items/{id}/toggle", post(items::toggle_item))
    .route("/items/{id}", delete(items::delete_item))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ───────────────────────────────────────────────────────
