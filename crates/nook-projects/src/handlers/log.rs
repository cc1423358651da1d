//! Timeline (log entry) handlers.

use axum::{
  extract::{Path, State},
  response::Html,
};
use nook_auth::CurrentUser;
use serde::Deserialize;

use crate::{AppState, error::AppError, queries, render};

#[derive(Deserialize)]
pub struct LogEntryForm {
  pub note: String,
  #[serde(default)]
  pub url:  String,
}

pub async fn create_entry(
  State(state): State<AppState>,
  CurrentUser(username): CurrentUser,
  Path(project_id): Path<i64>,
  axum::Form(form): axum::Form<LogEntryForm>,
) -> Result<Html<String>, AppError> {
  let note = form.note.trim();
  if note.is_empty() {
    return Err(AppError::BadRequest("Note is required".to_owned()));
  }

  let visible = state.roster.visibility_set(&username);
  if queries::get_project(&state.db, project_id, &visible).await?.is_none() {
    return Err(AppError::NotFound);
  }

  queries::create_log_entry(&state.db, project_id, None, &username, note, form.url.trim())
    .await?;

  let entries = queries::list_log_entries(&state.db, project_id, &visible).await?;
  Ok(Html(render::timeline_html(&entries, project_id)))
}

pub async fn reply_form(
  CurrentUser(_): CurrentUser,
  Path((project_id, log_id)): Path<(i64, i64)>,
) -> Html<String> {
  Html(render::reply_form(project_id, log_id))
}

/// A reply's parent must be a visible entry of the same project; a parent
/// from another project or tenant is rejected.
pub async fn create_reply(
  State(state): State<AppState>,
  CurrentUser(username): CurrentUser,
  Path((project_id, log_id)): Path<(i64, i64)>,
  axum::Form(form): axum::Form<LogEntryForm>,
) -> Result<Html<String>, AppError> {
  let note = form.note.trim();
  if note.is_empty() {
    return Err(AppError::BadRequest("Note is required".to_owned()));
  }

  let visible = state.roster.visibility_set(&username);
  if !queries::parent_in_project(&state.db, log_id, project_id, &visible).await? {
    return Err(AppError::NotFound);
  }

  queries::create_log_entry(
    &state.db,
    project_id,
    Some(log_id),
    &username,
    note,
    form.url.trim(),
  )
  .await?;

  let entries = queries::list_log_entries(&state.db, project_id, &visible).await?;
  Ok(Html(render::timeline_html(&entries, project_id)))
}

pub async fn delete_entry(
  State(state): State<AppState>,
  CurrentUser(username): CurrentUser,
  Path((project_id, log_id)): Path<(i64, i64)>,
) -> Result<Html<String>, AppError> {
  let visible = state.roster.visibility_set(&username);
  queries::delete_log_entry(&state.db, log_id, &visible).await?;

  let entries = queries::list_log_entries(&state.db, project_id, &visible).await?;
  Ok(Html(render::timeline_html(&entries, project_id)))
}
