//! The user roster and the visibility-set resolver.
//!
//! The roster is loaded once from configuration at process start and is
//! immutable for the process lifetime. Entries may carry a share-group label;
//! entries with the same label see each other's rows. Group membership is
//! resolved per request by [`Roster::visibility_set`], a pure function over
//! the roster snapshot.

use serde::Deserialize;

/// One configured principal allowed to authenticate.
#[derive(Debug, Clone, Deserialize)]
pub struct RosterEntry {
  pub username:      String,
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub password_hash: String,
  /// Empty means solo tenant.
  #[serde(default)]
  pub share_group:   String,
}

/// The full list of configured users, in configuration order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Roster {
  entries: Vec<RosterEntry>,
}

impl Roster {
  pub fn new(entries: Vec<RosterEntry>) -> Self {
    Self { entries }
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  /// Look up an entry by exact username. First match wins; duplicate
  /// usernames are a configuration error and are not defended against.
  pub fn find(&self, username: &str) -> Option<&RosterEntry> {
    self.entries.iter().find(|e| e.username == username)
  }

  /// Compute the set of usernames whose rows `caller` may access.
  ///
  /// - An empty caller yields the degenerate singleton `{""}`; it should not
  ///   occur past authentication but is tolerated.
  /// - A caller absent from the roster, or present with an empty share-group,
  ///   yields the singleton `{caller}` (solo tenant).
  /// - Otherwise the set is every roster entry carrying the caller's
  ///   share-group label, in roster order, caller included.
  ///
  /// The result is never empty. Handlers splice it into parameterized
  /// `username IN (...)` predicates; one bound parameter per name.
  pub fn visibility_set(&self, caller: &str) -> VisibilitySet {
    if caller.is_empty() {
      return VisibilitySet(vec![String::new()]);
    }

    let group = self
      .find(caller)
      .map(|e| e.share_group.as_str())
      .unwrap_or("");

    if group.is_empty() {
      return VisibilitySet(vec![caller.to_owned()]);
    }

    let mut names: Vec<String> = Vec::with_capacity(self.entries.len());
    for entry in &self.entries {
      if entry.share_group == group && !names.iter().any(|n| n == &entry.username) {
        names.push(entry.username.clone());
      }
    }

    // Cannot be empty given the caller's own entry matched, but degrade to
    // solo tenancy rather than an unfiltered query if it somehow is.
    if names.is_empty() {
      names.push(caller.to_owned());
    }

    VisibilitySet(names)
  }
}

/// The usernames in scope for one caller's request, ordered and deduplicated.
/// Always contains at least one name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilitySet(Vec<String>);

impl VisibilitySet {
  pub fn names(&self) -> &[String] {
    &self.0
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn contains(&self, username: &str) -> bool {
    self.0.iter().any(|n| n == username)
  }

  pub fn iter(&self) -> impl Iterator<Item = &str> {
    self.0.iter().map(String::as_str)
  }

  pub fn into_names(self) -> Vec<String> {
    self.0
  }
}
