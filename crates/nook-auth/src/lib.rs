//! JWT-cookie authentication for the nook applications.
//!
//! Login verifies the submitted password against the roster's argon2 PHC
//! hashes, mints an HS256 token, and stores it in an `auth_token` cookie.
//! Protected handlers take the [`CurrentUser`] extractor, which validates the
//! cookie and redirects to `/login` when it is missing or invalid.

pub mod cookie;
pub mod credentials;
pub mod error;
pub mod extract;
pub mod token;

pub use cookie::{AUTH_COOKIE, clear_session_cookie, session_cookie, token_from_headers};
pub use credentials::{hash_password, verify_credentials};
pub use error::{Error, Result};
pub use extract::{CurrentUser, LoginRedirect};
pub use token::Tokens;
