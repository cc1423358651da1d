//! Password verification against the roster.

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString,
};
use nook_core::Roster;
use rand_core::OsRng;

use crate::{Error, Result};

/// Check a submitted username/password pair against the roster.
///
/// Unknown usernames, malformed stored hashes, and wrong passwords all fail
/// with the same error.
pub fn verify_credentials(roster: &Roster, username: &str, password: &str) -> Result<()> {
  let entry = roster.find(username).ok_or(Error::InvalidCredentials)?;

  let parsed = PasswordHash::new(&entry.password_hash).map_err(|_| Error::InvalidCredentials)?;

  Argon2::default()
    .verify_password(password.as_bytes(), &parsed)
    .map_err(|_| Error::InvalidCredentials)?;

  Ok(())
}

/// Produce the argon2 PHC string stored in the roster's `password_hash`
/// field. Used by the binaries' `--hash-password` helper mode.
pub fn hash_password(password: &str) -> Result<String> {
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|hash| hash.to_string())
    .map_err(|e| Error::PasswordHash(e.to_string()))
}

#[cfg(test)]
mod tests {
  use super::*;
  use nook_core::RosterEntry;

  fn roster_with(username: &str, password: &str) -> Roster {
    Roster::new(vec![RosterEntry {
      username:      username.to_owned(),
      password_hash: hash_password(password).unwrap(),
      share_group:   String::new(),
    }])
  }

  #[test]
  fn correct_password_verifies() {
    let roster = roster_with("alice", "hunter2");
    assert!(verify_credentials(&roster, "alice", "hunter2").is_ok());
  }

  #[test]
  fn wrong_password_is_rejected() {
    let roster = roster_with("alice", "hunter2");
    assert!(matches!(
      verify_credentials(&roster, "alice", "wrong"),
      Err(Error::InvalidCredentials)
    ));
  }

  #[test]
  fn unknown_user_is_rejected() {
    let roster = roster_with("alice", "hunter2");
    assert!(matches!(
      verify_credentials(&roster, "mallory", "hunter2"),
      Err(Error::InvalidCredentials)
    ));
  }

  #[test]
  fn malformed_stored_hash_is_rejected() {
    let roster = Roster::new(vec![RosterEntry {
      username:      "alice".to_owned(),
      password_hash: "not-a-phc-string".to_owned(),
      share_group:   String::new(),
    }]);
    assert!(verify_credentials(&roster, "alice", "hunter2").is_err());
  }
}
