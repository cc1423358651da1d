//! Shared HTML shell for the nook applications.
//!
//! All pages are assembled from string fragments: a base layout with the app
//! header, a login page, the changelog panel, and the embedded stylesheet.
//! Interactivity comes from HTMX attributes on the fragments; there is no
//! client-side build step.

pub mod changelog;
pub mod escape;
pub mod layout;

pub use escape::escape_html;
pub use layout::{Shell, login_page};

use axum::{
  http::header,
  response::{IntoResponse, Response},
};

/// The stylesheet shared by every app, served at `/custom.css`.
pub const CUSTOM_CSS: &str = include_str!("custom.css");

pub async fn css_handler() -> Response {
  (
    [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
    CUSTOM_CSS,
  )
    .into_response()
}
