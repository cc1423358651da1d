//! Project CRUD handlers.

use axum::{
  extract::{Path, Query, State},
  http::HeaderMap,
  response::{Html, IntoResponse, Response},
};
use nook_auth::CurrentUser;
use serde::Deserialize;

use crate::{
  AppState,
  error::AppError,
  hx_redirect,
  queries::{self, ProjectFilters, ProjectInput},
  render, shell,
};

#[derive(Deserialize, Default)]
pub struct HomeQuery {
  pub stage:  Option<String>,
  #[serde(rename = "type")]
  pub kind:   Option<String>,
  pub rating: Option<String>,
}

impl HomeQuery {
  /// Normalise raw query values: empty strings mean "no filter" and a
  /// non-numeric rating is ignored.
  fn into_filters(self) -> ProjectFilters {
    ProjectFilters {
      stage:  self.stage.filter(|s| !s.is_empty()),
      kind:   self.kind.filter(|k| !k.is_empty()),
      rating: self
        .rating
        .and_then(|r| r.parse().ok())
        .unwrap_or(0),
    }
  }
}

pub async fn home(
  State(state): State<AppState>,
  CurrentUser(username): CurrentUser,
  Query(query): Query<HomeQuery>,
  headers: HeaderMap,
) -> Result<Response, AppError> {
  let filters = query.into_filters();
  let visible = state.roster.visibility_set(&username);
  let projects = queries::list_projects(&state.db, &visible, filters.clone()).await?;

  // HTMX filter clicks swap just the card list.
  if headers
    .get("hx-request")
    .is_some_and(|v| v.as_bytes() == b"true")
  {
    return Ok(Html(render::project_cards(&projects)).into_response());
  }

  let content = render::home_content(&projects, &filters);
  Ok(
    shell(&state.config)
      .page("Projects", Some(&username), &content)
      .into_response(),
  )
}

pub async fn new_project_form(CurrentUser(_): CurrentUser) -> Html<String> {
  Html(render::project_form(None))
}

#[derive(Deserialize)]
pub struct ProjectFormData {
  pub short_name:        String,
  #[serde(default)]
  pub short_description: String,
  #[serde(default)]
  pub full_description:  String,
  #[serde(default)]
  pub website_url:       String,
  #[serde(default)]
  pub source_url:        String,
  pub is_commercial:     Option<String>,
  pub is_open_source:    Option<String>,
  pub is_public:         Option<String>,
  #[serde(default)]
  pub stage:             String,
  pub rating:            Option<String>,
}

impl ProjectFormData {
  fn into_input(self) -> Result<ProjectInput, AppError> {
    let short_name = self.short_name.trim().to_owned();
    if short_name.is_empty() {
      return Err(AppError::BadRequest("Project name is required".to_owned()));
    }
    Ok(ProjectInput {
      short_name,
      short_description: self.short_description.trim().to_owned(),
      full_description: self.full_description.trim().to_owned(),
      website_url: self.website_url.trim().to_owned(),
      source_url: self.source_url.trim().to_owned(),
      is_commercial: self.is_commercial.is_some(),
      is_open_source: self.is_open_source.is_some(),
      is_public: self.is_public.is_some(),
      stage: if self.stage.is_empty() {
        "idea".to_owned()
      } else {
        self.stage
      },
      rating: self.rating.and_then(|r| r.parse().ok()).unwrap_or(0),
    })
  }
}

pub async fn create_project(
  State(state): State<AppState>,
  CurrentUser(username): CurrentUser,
  axum::Form(form): axum::Form<ProjectFormData>,
) -> Result<Response, AppError> {
  let input = form.into_input()?;
  queries::create_project(&state.db, &username, input).await?;
  Ok(hx_redirect("/".to_owned()))
}

pub async fn detail(
  State(state): State<AppState>,
  CurrentUser(username): CurrentUser,
  Path(project_id): Path<i64>,
) -> Result<Html<String>, AppError> {
  let visible = state.roster.visibility_set(&username);
  let project = queries::get_project(&state.db, project_id, &visible)
    .await?
    .ok_or(AppError::NotFound)?;
  let entries = queries::list_log_entries(&state.db, project_id, &visible).await?;

  let content = render::detail_content(&project, &entries);
  Ok(shell(&state.config).page(&project.short_name, Some(&username), &content))
}

pub async fn edit_project_form(
  State(state): State<AppState>,
  CurrentUser(username): CurrentUser,
  Path(project_id): Path<i64>,
) -> Result<Html<String>, AppError> {
  let visible = state.roster.visibility_set(&username);
  let project = queries::get_project(&state.db, project_id, &visible)
    .await?
    .ok_or(AppError::NotFound)?;
  Ok(Html(render::project_form(Some(&project))))
}

pub async fn update_project(
  State(state): State<AppState>,
  CurrentUser(username): CurrentUser,
  Path(project_id): Path<i64>,
  axum::Form(form): axum::Form<ProjectFormData>,
) -> Result<Response, AppError> {
  let input = form.into_input()?;
  let visible = state.roster.visibility_set(&username);
  queries::update_project(&state.db, project_id, &visible, input).await?;
  Ok(hx_redirect(format!("/projects/{project_id}")))
}

#[derive(Deserialize)]
pub struct StageForm {
  pub stage: String,
}

/// Inline stage change from the detail page.
pub async fn update_stage(
  State(state): State<AppState>,
  CurrentUser(username): CurrentUser,
  Path(project_id): Path<i64>,
  axum::Form(form): axum::Form<StageForm>,
) -> Result<(), AppError> {
  let visible = state.roster.visibility_set(&username);
  queries::update_stage(&state.db, project_id, &visible, &form.stage).await?;
  Ok(())
}

pub async fn delete_project(
  State(state): State<AppState>,
  CurrentUser(username): CurrentUser,
  Path(project_id): Path<i64>,
) -> Result<Response, AppError> {
  let visible = state.roster.visibility_set(&username);
  queries::delete_project(&state.db, project_id, &visible).await?;
  Ok(hx_redirect("/".to_owned()))
}
