//! The `auth_token` session cookie.

use axum::http::{HeaderMap, header};

use crate::token::TOKEN_TTL_SECONDS;

pub const AUTH_COOKIE: &str = "auth_token";

/// `Set-Cookie` value storing a freshly minted session token.
pub fn session_cookie(token: &str) -> String {
  format!("{AUTH_COOKIE}={token}; Path=/; HttpOnly; SameSite=Strict; Max-Age={TOKEN_TTL_SECONDS}")
}

/// `Set-Cookie` value expiring the session cookie.
pub fn clear_session_cookie() -> String {
  format!("{AUTH_COOKIE}=; Path=/; HttpOnly; SameSite=Strict; Max-Age=0")
}

/// Pull the session token out of the request's `Cookie` header(s).
pub fn token_from_headers(headers: &HeaderMap) -> Option<&str> {
  for value in headers.get_all(header::COOKIE) {
    let Ok(raw) = value.to_str() else { continue };
    for pair in raw.split(';') {
      if let Some(token) = pair.trim().strip_prefix(AUTH_COOKIE)
        && let Some(token) = token.strip_prefix('=')
        && !token.is_empty()
      {
        return Some(token);
      }
    }
  }
  None
}
