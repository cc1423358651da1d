//! Linear migration runner.
//!
//! Applied migrations are recorded in a `migrations` bookkeeping table inside
//! the same database. On every startup the full statement list is walked in
//! order; statements whose name is already recorded are skipped, the rest are
//! executed and recorded. Each statement plus its bookkeeping insert is its
//! own unit with no cross-statement transaction, so a failure leaves every
//! strictly earlier statement applied.

const CREATE_BOOKKEEPING: &str = "
CREATE TABLE IF NOT EXISTS migrations (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL UNIQUE,
    applied_at  TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

/// Canonical bookkeeping name for the migration at `index` (0-based) in the
/// statement list: `migration_001`, `migration_002`, ...
///
/// The format is 1-indexed and zero-padded to three digits and MUST stay
/// stable for the lifetime of any deployed database file: a recorded name is
/// the only thing tying a statement to "already applied". It also means the
/// list itself must stay append-only. Reordering or removing earlier entries
/// re-associates recorded names with different statement text.
pub fn migration_name(index: usize) -> String {
  format!("migration_{:03}", index + 1)
}

pub(crate) async fn run(
  conn: &tokio_rusqlite::Connection,
  migrations: Vec<(String, String)>,
) -> crate::Result<()> {
  let outcome = conn
    .call(move |conn| {
      conn.execute(CREATE_BOOKKEEPING, [])?;

      for (name, sql) in &migrations {
        let applied: i64 = conn.query_row(
          "SELECT COUNT(*) FROM migrations WHERE name = ?1",
          rusqlite::params![name],
          |row| row.get(0),
        )?;
        if applied > 0 {
          continue;
        }

        // Fail fast: surface the failing statement's name and stop. Earlier
        // statements stay applied and recorded.
        if let Err(source) = conn.execute_batch(sql) {
          return Ok(Err((name.clone(), source)));
        }

        if let Err(source) = conn.execute(
          "INSERT INTO migrations (name) VALUES (?1)",
          rusqlite::params![name],
        ) {
          return Ok(Err((name.clone(), source)));
        }
      }

      Ok(Ok(()))
    })
    .await?;

  outcome.map_err(|(name, source)| crate::Error::Migration { name, source })
}
