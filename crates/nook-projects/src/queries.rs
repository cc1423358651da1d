//! SQL queries for projects and their log entries.
//!
//! Every owner-filtered statement takes the caller's full visibility set and
//! binds each username as a discrete parameter.

use std::collections::HashMap;

use nook_core::VisibilitySet;
use nook_store_sqlite::{Db, Result, placeholders};
use rusqlite::ToSql;

pub struct Project {
  pub id:                i64,
  pub username:          String,
  pub short_name:        String,
  pub short_description: String,
  pub full_description:  String,
  pub website_url:       String,
  pub source_url:        String,
  pub is_commercial:     bool,
  pub is_open_source:    bool,
  pub is_public:         bool,
  pub stage:             String,
  pub rating:            i64,
  pub created_at:        String,
  pub updated_at:        String,
}

/// New or updated project fields, as submitted by the form.
pub struct ProjectInput {
  pub short_name:        String,
  pub short_description: String,
  pub full_description:  String,
  pub website_url:       String,
  pub source_url:        String,
  pub is_commercial:     bool,
  pub is_open_source:    bool,
  pub is_public:         bool,
  pub stage:             String,
  pub rating:            i64,
}

/// Optional listing filters; `None`/`0` means "no filter".
#[derive(Clone, Default)]
pub struct ProjectFilters {
  pub stage:  Option<String>,
  pub kind:   Option<String>,
  pub rating: i64,
}

pub struct LogEntry {
  pub id:         i64,
  pub project_id: i64,
  pub parent_id:  Option<i64>,
  pub username:   String,
  pub note:       String,
  pub url:        String,
  pub created_at: String,
  pub children:   Vec<LogEntry>,
}

const PROJECT_COLUMNS: &str = "id, username, short_name, short_description, full_description,
  website_url, source_url, is_commercial, is_open_source, is_public,
  stage, rating, created_at, updated_at";

fn project_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Project> {
  Ok(Project {
    id:                row.get(0)?,
    username:          row.get(1)?,
    short_name:        row.get(2)?,
    short_description: row.get(3)?,
    full_description:  row.get(4)?,
    website_url:       row.get(5)?,
    source_url:        row.get(6)?,
    is_commercial:     row.get(7)?,
    is_open_source:    row.get(8)?,
    is_public:         row.get(9)?,
    stage:             row.get(10)?,
    rating:            row.get(11)?,
    created_at:        row.get(12)?,
    updated_at:        row.get(13)?,
  })
}

/// Visible projects with optional stage/type/rating filters, most recently
/// updated first.
pub async fn list_projects(
  db: &Db,
  visible: &VisibilitySet,
  filters: ProjectFilters,
) -> Result<Vec<Project>> {
  let names = visible.names().to_vec();
  db.call(move |conn| {
    let mut sql = format!(
      "SELECT {PROJECT_COLUMNS} FROM projects WHERE username IN ({})",
      placeholders(names.len())
    );
    let mut args: Vec<&dyn ToSql> = names.iter().map(|n| n as &dyn ToSql).collect();

    if let Some(stage) = filters.stage.as_ref() {
      sql.push_str(" AND stage = ?");
      args.push(stage);
    }
    match filters.kind.as_deref() {
      Some("commercial") => sql.push_str(" AND is_commercial = 1"),
      Some("open-source") => sql.push_str(" AND is_open_source = 1"),
      Some("public") => sql.push_str(" AND is_public = 1"),
      _ => {}
    }
    if filters.rating > 0 {
      sql.push_str(" AND rating = ?");
      args.push(&filters.rating);
    }
    sql.push_str(" ORDER BY updated_at DESC");

    let mut stmt = conn.prepare(&sql)?;
    let projects = stmt
      .query_map(&args[..], project_from_row)?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(projects)
  })
  .await
}

/// A single visible project, or `None` when absent or out of scope.
pub async fn get_project(
  db: &Db,
  project_id: i64,
  visible: &VisibilitySet,
) -> Result<Option<Project>> {
  let names = visible.names().to_vec();
  db.call(move |conn| {
    let sql = format!(
      "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = ? AND username IN ({})",
      placeholders(names.len())
    );
    let mut args: Vec<&dyn ToSql> = vec![&project_id];
    for name in &names {
      args.push(name);
    }
    let project = conn
      .query_row(&sql, &args[..], project_from_row)
      .map(Some)
      .or_else(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => Ok(None),
        other => Err(other),
      })?;
    Ok(project)
  })
  .await
}

pub async fn create_project(db: &Db, username: &str, input: ProjectInput) -> Result<i64> {
  let username = username.to_owned();
  db.call(move |conn| {
    conn.execute(
      "INSERT INTO projects (username, short_name, short_description, full_description,
         website_url, source_url, is_commercial, is_open_source, is_public, stage, rating)
       VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
      rusqlite::params![
        username,
        input.short_name,
        input.short_description,
        input.full_description,
        input.website_url,
        input.source_url,
        input.is_commercial,
        input.is_open_source,
        input.is_public,
        input.stage,
        input.rating,
      ],
    )?;
    Ok(conn.last_insert_rowid())
  })
  .await
}

pub async fn update_project(
  db: &Db,
  project_id: i64,
  visible: &VisibilitySet,
  input: ProjectInput,
) -> Result<()> {
  let names = visible.names().to_vec();
  db.call(move |conn| {
    let sql = format!(
      "UPDATE projects SET short_name = ?, short_description = ?, full_description = ?,
         website_url = ?, source_url = ?, is_commercial = ?, is_open_source = ?,
         is_public = ?, stage = ?, rating = ?, updated_at = CURRENT_TIMESTAMP
       WHERE id = ? AND username IN ({})",
      placeholders(names.len())
    );
    let mut args: Vec<&dyn ToSql> = vec![
      &input.short_name,
      &input.short_description,
      &input.full_description,
      &input.website_url,
      &input.source_url,
      &input.is_commercial,
      &input.is_open_source,
      &input.is_public,
      &input.stage,
      &input.rating,
      &project_id,
    ];
    for name in &names {
      args.push(name);
    }
    conn.execute(&sql, &args[..])?;
    Ok(())
  })
  .await
}

pub async fn update_stage(
  db: &Db,
  project_id: i64,
  visible: &VisibilitySet,
  stage: &str,
) -> Result<()> {
  let names = visible.names().to_vec();
  let stage = stage.to_owned();
  db.call(move |conn| {
    let sql = format!(
      "UPDATE projects SET stage = ?, updated_at = CURRENT_TIMESTAMP
       WHERE id = ? AND username IN ({})",
      placeholders(names.len())
    );
    let mut args: Vec<&dyn ToSql> = vec![&stage, &project_id];
    for name in &names {
      args.push(name);
    }
    conn.execute(&sql, &args[..])?;
    Ok(())
  })
  .await
}

pub async fn delete_project(db: &Db, project_id: i64, visible: &VisibilitySet) -> Result<()> {
  let names = visible.names().to_vec();
  db.call(move |conn| {
    let sql = format!(
      "DELETE FROM projects WHERE id = ? AND username IN ({})",
      placeholders(names.len())
    );
    let mut args: Vec<&dyn ToSql> = vec![&project_id];
    for name in &names {
      args.push(name);
    }
    conn.execute(&sql, &args[..])?;
    Ok(())
  })
  .await
}

// ─── Log entries ─────────────────────────────────────────────────────────────

/// All visible log entries for a project, newest first, as a one-level tree:
/// root entries carry their direct replies in `children`.
pub async fn list_log_entries(
  db: &Db,
  project_id: i64,
  visible: &VisibilitySet,
) -> Result<Vec<LogEntry>> {
  let names = visible.names().to_vec();
  db.call(move |conn| {
    let sql = format!(
      "SELECT id, project_id, parent_id, username, note, url, created_at
       FROM log_entries
       WHERE project_id = ? AND username IN ({})
       ORDER BY created_at DESC",
      placeholders(names.len())
    );
    let mut args: Vec<&dyn ToSql> = vec![&project_id];
    for name in &names {
      args.push(name);
    }

    let mut stmt = conn.prepare(&sql)?;
    let all = stmt
      .query_map(&args[..], |row| {
        Ok(LogEntry {
          id:         row.get(0)?,
          project_id: row.get(1)?,
          parent_id:  row.get(2)?,
          username:   row.get(3)?,
          note:       row.get(4)?,
          url:        row.get(5)?,
          created_at: row.get(6)?,
          children:   Vec::new(),
        })
      })?
      .collect::<rusqlite::Result<Vec<_>>>()?;

    // Split into roots and children, then attach replies to their roots.
    // Replies whose parent is itself a reply are not rendered.
    let mut children: HashMap<i64, Vec<LogEntry>> = HashMap::new();
    let mut roots = Vec::new();
    for entry in all {
      match entry.parent_id {
        Some(parent) => children.entry(parent).or_default().push(entry),
        None => roots.push(entry),
      }
    }
    for root in &mut roots {
      if let Some(replies) = children.remove(&root.id) {
        root.children = replies;
      }
    }
    Ok(roots)
  })
  .await
}

/// Insert a log entry (optionally a reply) and bump the project's
/// `updated_at`. The caller has already checked project and parent scope.
pub async fn create_log_entry(
  db: &Db,
  project_id: i64,
  parent_id: Option<i64>,
  username: &str,
  note: &str,
  url: &str,
) -> Result<()> {
  let (username, note, url) = (username.to_owned(), note.to_owned(), url.to_owned());
  db.call(move |conn| {
    conn.execute(
      "INSERT INTO log_entries (project_id, parent_id, username, note, url)
       VALUES (?1, ?2, ?3, ?4, ?5)",
      rusqlite::params![project_id, parent_id, username, note, url],
    )?;
    conn.execute(
      "UPDATE projects SET updated_at = CURRENT_TIMESTAMP WHERE id = ?1",
      rusqlite::params![project_id],
    )?;
    Ok(())
  })
  .await
}

/// Whether `parent_id` is a visible entry of `project_id`. Guards replies
/// against cross-project and cross-tenant parents.
pub async fn parent_in_project(
  db: &Db,
  parent_id: i64,
  project_id: i64,
  visible: &VisibilitySet,
) -> Result<bool> {
  let names = visible.names().to_vec();
  db.call(move |conn| {
    let sql = format!(
      "SELECT COUNT(*) FROM log_entries
       WHERE id = ? AND project_id = ? AND username IN ({})",
      placeholders(names.len())
    );
    let mut args: Vec<&dyn ToSql> = vec![&parent_id, &project_id];
    for name in &names {
      args.push(name);
    }
    let count: i64 = conn.query_row(&sql, &args[..], |row| row.get(0))?;
    Ok(count > 0)
  })
  .await
}

pub async fn delete_log_entry(db: &Db, log_id: i64, visible: &VisibilitySet) -> Result<()> {
  let names = visible.names().to_vec();
  db.call(move |conn| {
    let sql = format!(
      "DELETE FROM log_entries WHERE id = ? AND username IN ({})",
      placeholders(names.len())
    );
    let mut args: Vec<&dyn ToSql> = vec![&log_id];
    for name in &names {
      args.push(name);
    }
    conn.execute(&sql, &args[..])?;
    Ok(())
  })
  .await
}
