//! Migration-runner tests against an in-memory database.

use crate::{Db, Error, migration_name, placeholders};

async fn db() -> Db {
  Db::open_in_memory().await.expect("in-memory db")
}

async fn bookkeeping_rows(db: &Db) -> Vec<String> {
  db.call(|conn| {
    let mut stmt = conn.prepare("SELECT name FROM migrations ORDER BY id")?;
    let names = stmt
      .query_map([], |row| row.get::<_, String>(0))?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(names)
  })
  .await
  .unwrap()
}

async fn marker_count(db: &Db) -> i64 {
  db.call(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM markers", [], |row| row.get(0))?))
    .await
    .unwrap()
}

const CREATE_MARKERS: &str = "CREATE TABLE markers (id INTEGER PRIMARY KEY AUTOINCREMENT, label TEXT)";

// ─── Idempotency ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn migrations_apply_once() {
  let db = db().await;
  // An INSERT migration makes re-execution observable.
  let statements = [CREATE_MARKERS, "INSERT INTO markers (label) VALUES ('a')"];

  db.run_migrations(&statements).await.unwrap();
  assert_eq!(marker_count(&db).await, 1);
  assert_eq!(
    bookkeeping_rows(&db).await,
    vec!["migration_001", "migration_002"]
  );

  // Re-running the identical list executes nothing.
  db.run_migrations(&statements).await.unwrap();
  assert_eq!(marker_count(&db).await, 1);
  assert_eq!(bookkeeping_rows(&db).await.len(), 2);
}

#[tokio::test]
async fn new_trailing_migrations_are_applied() {
  let db = db().await;
  db.run_migrations(&[CREATE_MARKERS]).await.unwrap();

  db.run_migrations(&[CREATE_MARKERS, "INSERT INTO markers (label) VALUES ('b')"])
    .await
    .unwrap();
  assert_eq!(marker_count(&db).await, 1);
  assert_eq!(bookkeeping_rows(&db).await.len(), 2);
}

// ─── Ordinal naming ──────────────────────────────────────────────────────────

#[tokio::test]
async fn names_are_ordinal_and_one_indexed() {
  assert_eq!(migration_name(0), "migration_001");
  assert_eq!(migration_name(9), "migration_010");
  assert_eq!(migration_name(99), "migration_100");
}

#[tokio::test]
async fn application_identity_is_ordinal_not_content() {
  // Documented hazard: a reordered list does NOT re-run statements, because
  // the recorded ordinal names already cover both positions.
  let db = db().await;
  let s1 = CREATE_MARKERS;
  let s2 = "INSERT INTO markers (label) VALUES ('a')";

  db.run_migrations(&[s1, s2]).await.unwrap();
  assert_eq!(marker_count(&db).await, 1);

  // Restart with the list reordered: nothing executes again.
  db.run_migrations(&[s2, s1]).await.unwrap();
  assert_eq!(marker_count(&db).await, 1);
  assert_eq!(bookkeeping_rows(&db).await.len(), 2);
}

#[tokio::test]
async fn named_migrations_are_keyed_by_name() {
  let db = db().await;
  db.run_named_migrations(vec![(
    "create-markers".to_owned(),
    CREATE_MARKERS.to_owned(),
  )])
  .await
  .unwrap();

  // Same name, different text: skipped. New name: applied.
  db.run_named_migrations(vec![
    ("create-markers".to_owned(), "nonsense sql".to_owned()),
    (
      "seed-markers".to_owned(),
      "INSERT INTO markers (label) VALUES ('a')".to_owned(),
    ),
  ])
  .await
  .unwrap();

  assert_eq!(marker_count(&db).await, 1);
  assert_eq!(bookkeeping_rows(&db).await, vec!["create-markers", "seed-markers"]);
}

// ─── Partial failure ─────────────────────────────────────────────────────────

#[tokio::test]
async fn failure_stops_the_run_and_keeps_earlier_statements() {
  let db = db().await;
  let good = CREATE_MARKERS;
  let bad = "INSERT INTO does_not_exist (x) VALUES (1)";
  let never_reached = "INSERT INTO markers (label) VALUES ('c')";

  let err = db
    .run_migrations(&[good, bad, never_reached])
    .await
    .unwrap_err();
  match err {
    Error::Migration { name, .. } => assert_eq!(name, "migration_002"),
    other => panic!("unexpected error: {other}"),
  }

  // Exactly the first statement is applied and recorded.
  assert_eq!(bookkeeping_rows(&db).await, vec!["migration_001"]);
  assert_eq!(marker_count(&db).await, 0);

  // A corrected list resumes from the failure point.
  let fixed = "INSERT INTO markers (label) VALUES ('b')";
  db.run_migrations(&[good, fixed, never_reached]).await.unwrap();
  assert_eq!(
    bookkeeping_rows(&db).await,
    vec!["migration_001", "migration_002", "migration_003"]
  );
  assert_eq!(marker_count(&db).await, 2);
}

#[tokio::test]
async fn empty_migration_list_only_creates_bookkeeping() {
  let db = db().await;
  db.run_migrations(&[]).await.unwrap();
  assert!(bookkeeping_rows(&db).await.is_empty());
}

// ─── Placeholders ────────────────────────────────────────────────────────────

#[test]
fn placeholders_join_with_commas() {
  assert_eq!(placeholders(1), "?");
  assert_eq!(placeholders(3), "?, ?, ?");
}

#[tokio::test]
async fn placeholders_bind_in_queries() {
  let db = db().await;
  db.run_migrations(&[
    "CREATE TABLE rows_by_owner (owner TEXT NOT NULL)",
    "INSERT INTO rows_by_owner (owner) VALUES ('alice'), ('bob'), ('carol')",
  ])
  .await
  .unwrap();

  let names = vec!["alice".to_owned(), "bob".to_owned()];
  let count: i64 = db
    .call(move |conn| {
      let sql = format!(
        "SELECT COUNT(*) FROM rows_by_owner WHERE owner IN ({})",
        placeholders(names.len())
      );
      Ok(conn.query_row(&sql, rusqlite::params_from_iter(names.iter()), |row| row.get(0))?)
    })
    .await
    .unwrap();
  assert_eq!(count, 2);
}
