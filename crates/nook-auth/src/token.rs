//! HS256 session tokens.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Session lifetime in seconds (24 hours). The cookie's `Max-Age` matches.
pub const TOKEN_TTL_SECONDS: i64 = 86_400;

/// Payload carried in the session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
  pub username: String,
  pub iat:      i64,
  pub exp:      i64,
}

/// Mints and verifies session tokens for one server instance.
#[derive(Clone)]
pub struct Tokens {
  secret: String,
}

impl Tokens {
  pub fn new(secret: impl Into<String>) -> Self {
    Self {
      secret: secret.into(),
    }
  }

  /// Mint a token for an authenticated username.
  pub fn generate(&self, username: &str) -> Result<String> {
    let now = Utc::now().timestamp();
    let claims = Claims {
      username: username.to_owned(),
      iat:      now,
      exp:      now + TOKEN_TTL_SECONDS,
    };

    encode(
      &Header::default(),
      &claims,
      &EncodingKey::from_secret(self.secret.as_bytes()),
    )
    .map_err(Error::TokenSigning)
  }

  /// Verify a token and return the username it was minted for.
  pub fn verify(&self, token: &str) -> Result<String> {
    decode::<Claims>(
      token,
      &DecodingKey::from_secret(self.secret.as_bytes()),
      &Validation::default(),
    )
    .map(|data| data.claims.username)
    .map_err(|_| Error::InvalidToken)
  }
}
