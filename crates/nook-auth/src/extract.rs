//! Axum extractor for the authenticated username.

use std::{convert::Infallible, sync::Arc};

use axum::{
  extract::{FromRef, FromRequestParts, OptionalFromRequestParts},
  http::request::Parts,
  response::{IntoResponse, Redirect, Response},
};

use crate::{cookie::token_from_headers, token::Tokens};

/// Present in a handler's arguments means the request carried a valid session
/// cookie; the inner value is the authenticated username.
pub struct CurrentUser(pub String);

/// Rejection: bounce unauthenticated browsers to the login page.
pub struct LoginRedirect;

impl IntoResponse for LoginRedirect {
  fn into_response(self) -> Response {
    Redirect::to("/login").into_response()
  }
}

impl<S> FromRequestParts<S> for CurrentUser
where
  S: Send + Sync,
  Arc<Tokens>: FromRef<S>,
{
  type Rejection = LoginRedirect;

  async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
    let tokens: Arc<Tokens> = FromRef::from_ref(state);
    let token = token_from_headers(&parts.headers).ok_or(LoginRedirect)?;
    let username = tokens.verify(token).map_err(|_| LoginRedirect)?;
    Ok(CurrentUser(username))
  }
}

/// `Option<CurrentUser>` never rejects. Pages like `/changelog` are public
/// but greet the user when a valid session is present.
impl<S> OptionalFromRequestParts<S> for CurrentUser
where
  S: Send + Sync,
  Arc<Tokens>: FromRef<S>,
{
  type Rejection = Infallible;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &S,
  ) -> Result<Option<Self>, Self::Rejection> {
    let tokens: Arc<Tokens> = FromRef::from_ref(state);
    Ok(
      token_from_headers(&parts.headers)
        .and_then(|token| tokens.verify(token).ok())
        .map(CurrentUser),
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use axum::http::{Request, header};

  #[derive(Clone)]
  struct TestState {
    tokens: Arc<Tokens>,
  }

  impl FromRef<TestState> for Arc<Tokens> {
    fn from_ref(state: &TestState) -> Self {
      state.tokens.clone()
    }
  }

  fn state() -> TestState {
    TestState {
      tokens: Arc::new(Tokens::new("extractor-test-secret")),
    }
  }

  async fn extract(state: &TestState, cookie: Option<String>) -> Result<CurrentUser, LoginRedirect> {
    let mut builder = Request::builder().uri("/");
    if let Some(cookie) = cookie {
      builder = builder.header(header::COOKIE, cookie);
    }
    let (mut parts, _) = builder.body(()).unwrap().into_parts();
    <CurrentUser as FromRequestParts<TestState>>::from_request_parts(&mut parts, state).await
  }

  #[tokio::test]
  async fn valid_cookie_yields_username() {
    let state = state();
    let token = state.tokens.generate("alice").unwrap();
    let user = extract(&state, Some(format!("auth_token={token}")))
      .await
      .ok()
      .expect("authenticated");
    assert_eq!(user.0, "alice");
  }

  #[tokio::test]
  async fn missing_cookie_redirects() {
    let state = state();
    assert!(extract(&state, None).await.is_err());
  }

  #[tokio::test]
  async fn tampered_token_redirects() {
    let state = state();
    let other = Tokens::new("some-other-secret");
    let token = other.generate("alice").unwrap();
    assert!(
      extract(&state, Some(format!("auth_token={token}")))
        .await
        .is_err()
    );
  }
}
