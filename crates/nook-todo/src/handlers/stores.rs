//! Store (shopping list) handlers.

use axum::{
  extract::{Path, State},
  response::{Html, Response},
};
use nook_auth::CurrentUser;
use serde::Deserialize;

use crate::{AppState, error::AppError, hx_redirect, queries, render, shell};

pub async fn home(
  State(state): State<AppState>,
  CurrentUser(username): CurrentUser,
) -> Result<Html<String>, AppError> {
  let visible = state.roster.visibility_set(&username);
  let stores = queries::stores_with_items(&state.db, &visible).await?;
  let content = render::home_content(&stores);
  Ok(shell(&state.config).page("Todo List", Some(&username), &content))
}

pub async fn new_store_form(CurrentUser(_): CurrentUser) -> Html<&'static str> {
  Html(render::new_store_form())
}

#[derive(Deserialize)]
pub struct CreateStoreForm {
  pub name:  String,
  #[serde(default)]
  pub color: String,
}

pub async fn create_store(
  State(state): State<AppState>,
  CurrentUser(username): CurrentUser,
  axum::Form(form): axum::Form<CreateStoreForm>,
) -> Result<Response, AppError> {
  let name = form.name.trim();
  if name.is_empty() {
    return Err(AppError::BadRequest("Store name required".to_owned()));
  }
  let color = if form.color.is_empty() {
    "#3B82F6"
  } else {
    form.color.as_str()
  };

  queries::create_store(&state.db, &username, name, color).await?;
  Ok(hx_redirect("/"))
}

/// Scoped delete; responds with the refreshed grid for the HTMX swap.
pub async fn delete_store(
  State(state): State<AppState>,
  CurrentUser(username): CurrentUser,
  Path(store_id): Path<i64>,
) -> Result<Html<String>, AppError> {
  let visible = state.roster.visibility_set(&username);
  queries::delete_store(&state.db, store_id, &visible).await?;

  let stores = queries::stores_with_items(&state.db, &visible).await?;
  Ok(Html(render::stores_grid(&stores)))
}
