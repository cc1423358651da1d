//! [`Db`] — a thin handle over a single SQLite file.

use std::path::Path;

use crate::{Error, Result, migrate};

/// A nook database backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted. All handlers
/// of one application share one handle, and SQLite's own locking serializes
/// concurrent writes.
#[derive(Clone)]
pub struct Db {
  conn: tokio_rusqlite::Connection,
}

impl Db {
  /// Open (or create) a database at `path`, creating the parent directory if
  /// it does not exist, and enable foreign-key enforcement.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    if let Some(dir) = path.parent()
      && !dir.as_os_str().is_empty()
    {
      std::fs::create_dir_all(dir).map_err(|source| Error::CreateDir {
        path: dir.to_path_buf(),
        source,
      })?;
    }

    let conn = tokio_rusqlite::Connection::open(path.to_path_buf()).await?;
    let db = Self { conn };
    db.init_pragmas().await?;
    Ok(db)
  }

  /// Open an in-memory database — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let db = Self { conn };
    db.init_pragmas().await?;
    Ok(db)
  }

  async fn init_pragmas(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run a closure against the underlying connection on its worker thread.
  pub async fn call<F, T>(&self, f: F) -> Result<T>
  where
    F: FnOnce(&mut rusqlite::Connection) -> std::result::Result<T, tokio_rusqlite::Error>
      + Send
      + 'static,
    T: Send + 'static,
  {
    Ok(self.conn.call(f).await?)
  }

  /// Apply `statements` in order, each exactly once per database lifetime.
  /// See [`migrate`](crate::migration_name) for the naming contract.
  pub async fn run_migrations(&self, statements: &[&str]) -> Result<()> {
    let named = statements
      .iter()
      .enumerate()
      .map(|(i, sql)| (migrate::migration_name(i), (*sql).to_owned()))
      .collect();
    self.run_named_migrations(named).await
  }

  /// Apply explicitly named migrations in order, each exactly once.
  ///
  /// Prefer [`Db::run_migrations`] unless the application needs names that
  /// survive list reordering.
  pub async fn run_named_migrations(&self, migrations: Vec<(String, String)>) -> Result<()> {
    migrate::run(&self.conn, migrations).await
  }
}

/// Build a `?, ?, ...` placeholder list for a parameterized `IN (...)`
/// predicate. Callers always pass at least one value; a visibility set is
/// never empty.
pub fn placeholders(count: usize) -> String {
  debug_assert!(count > 0, "IN () predicate with no values");
  let mut out = String::with_capacity(count * 3);
  for i in 0..count {
    if i > 0 {
      out.push_str(", ");
    }
    out.push('?');
  }
  out
}
