//! Item handlers.

use axum::{
  extract::{Path, State},
  response::Html,
};
use nook_auth::CurrentUser;
use serde::Deserialize;

use crate::{AppState, error::AppError, queries, render};

#[derive(Deserialize)]
pub struct CreateItemForm {
  pub name:     String,
  #[serde(default)]
  pub quantity: String,
}

pub async fn create_item(
  State(state): State<AppState>,
  CurrentUser(username): CurrentUser,
  Path(store_id): Path<i64>,
  axum::Form(form): axum::Form<CreateItemForm>,
) -> Result<Html<String>, AppError> {
  let name = form.name.trim();
  if name.is_empty() {
    return Err(AppError::BadRequest("Item name required".to_owned()));
  }

  let visible = state.roster.visibility_set(&username);
  if !queries::store_accessible(&state.db, store_id, &visible).await? {
    return Err(AppError::NotFound);
  }

  let item = queries::create_item(&state.db, store_id, &username, name, form.quantity.trim()).await?;
  Ok(Html(render::item_row(&item)))
}

pub async fn toggle_item(
  State(state): State<AppState>,
  CurrentUser(username): CurrentUser,
  Path(item_id): Path<i64>,
) -> Result<Html<String>, AppError> {
  let visible = state.roster.visibility_set(&username);
  let item = queries::toggle_item(&state.db, item_id, &visible)
    .await?
    .ok_or(AppError::NotFound)?;
  Ok(Html(render::item_row(&item)))
}

/// Scoped delete; the emptied response removes the row from the DOM.
pub async fn delete_item(
  State(state): State<AppState>,
  CurrentUser(username): CurrentUser,
  Path(item_id): Path<i64>,
) -> Result<(), AppError> {
  let visible = state.roster.visibility_set(&username);
  queries::delete_item(&state.db, item_id, &visible).await?;
  Ok(())
}
