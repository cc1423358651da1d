//! The project tracker application.
//!
//! Projects and their timeline entries are Owned Records: every read and
//! write is filtered through the caller's visibility set, so members of a
//! share group track projects together.

pub mod error;
pub mod handlers;
pub mod migrations;
pub mod queries;
pub mod render;

use std::sync::Arc;

use axum::{
  Router,
  extract::FromRef,
  http::HeaderName,
  response::{IntoResponse, Response},
  routing::{delete, get, post, put},
};
use nook_auth::Tokens;
use nook_core::{AppConfig, Roster};
use nook_store_sqlite::Db;
use nook_web::Shell;
use tower_http::trace::TraceLayer;

use handlers::{log, projects, session};

/// Valid project stages, in lifecycle order.
pub const STAGES: &[&str] = &["idea", "planning", "development", "released", "archived"];

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState {
  pub db:     Db,
  pub roster: Arc<Roster>,
  pub tokens: Arc<Tokens>,
  pub config: Arc<AppConfig>,
}

impl FromRef<AppState> for Arc<Tokens> {
  fn from_ref(state: &AppState) -> Self {
    state.tokens.clone()
  }
}

pub(crate) fn shell(config: &AppConfig) -> Shell<'_> {
  Shell {
    app_name:         &config.app_name,
    app_version:      &config.app_version,
    app_release_date: &config.app_release_date,
  }
}

/// 200 response carrying an `HX-Redirect` header; HTMX reloads the page.
pub(crate) fn hx_redirect(to: String) -> Response {
  [(HeaderName::from_static("hx-redirect"), to)].into_response()
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build the axum [`Router`] for the projects server.
///
/// Public routes: login, logout, health, changelog, stylesheet. Everything
/// else requires a valid session cookie via the `CurrentUser` extractor.
pub fn router(state: AppState) -> Router {
  Router::new()
    .route("/login", get(session::login_page).post(session::login))
    .route("/logout", post(session::logout))
    .route("/health", get(session::health))
    .route("/changelog", get(session::changelog))
    .route("/custom.css", get(nook_web::css_handler))
    .route("/", get(projects::home))
    .route("/projects/new", get(projects::new_project_form))
    .route("/projects", post(projects::create_project))
    .route(
      "/projects/{id}",
      get(projects::detail)
        .put(projects::update_project)
        .delete(projects::delete_project),
    )
    .route("/projects/{id}/edit", get(projects::edit_project_form))
    .route("/projects/{id}/stage", put(projects::update_stage))
    .route("/projects/{id}/log", post(log::create_entry))
    .route(
      "/projects/{id}/log/{log_id}/reply",
      get(log::reply_form).post(log::create_reply),
    )
    .route("/projects/{id}/log/{log_id}", delete(log::delete_entry))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;
  use std::path::PathBuf;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use nook_core::RosterEntry;
  use tower::ServiceExt as _;

  const TEST_SECRET: &str = "a-test-secret-for-the-projects-suite";

  fn entry(username: &str, hash: &str, share_group: &str) -> RosterEntry {
    RosterEntry {
      username:      username.to_owned(),
      password_hash: hash.to_owned(),
      share_group:   share_group.to_owned(),
    }
  }

  async fn make_state() -> AppState {
    let db = Db::open_in_memory().await.unwrap();
    db.run_migrations(migrations::MIGRATIONS).await.unwrap();

    let hash = nook_auth::hash_password("secret").unwrap();
    let roster = Roster::new(vec![
      entry("alice", &hash, "household"),
      entry("bob", &hash, "household"),
      entry("carol", &hash, ""),
    ]);

    AppState {
      db,
      roster: Arc::new(roster),
      tokens: Arc::new(Tokens::new(TEST_SECRET)),
      config: Arc::new(AppConfig {
        app_name:         "projects".to_owned(),
        app_version:      "0.1.0".to_owned(),
        app_release_date: "2025-06-01".to_owned(),
        changelog_path:   PathBuf::from("does-not-exist.toml"),
        host:             "127.0.0.1".to_owned(),
        port:             3002,
        db_path:          PathBuf::from(":memory:"),
        jwt_secret:       TEST_SECRET.to_owned(),
        users:            Roster::default(),
      }),
    }
  }

  async fn send(
    state: &AppState,
    method: &str,
    uri: &str,
    user: Option<&str>,
    form_body: Option<&str>,
  ) -> axum::response::Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
      let token = state.tokens.generate(user).unwrap();
      builder = builder.header(header::COOKIE, format!("auth_token={token}"));
    }
    let body = match form_body {
      Some(form) => {
        builder = builder.header(
          header::CONTENT_TYPE,
          "application/x-www-form-urlencoded",
        );
        Body::from(form.to_string())
      }
      None => Body::empty(),
    };
    router(state.clone())
      .oneshot(builder.body(body).unwrap())
      .await
      .unwrap()
  }

  async fn send_hx(
    state: &AppState,
    uri: &str,
    user: &str,
  ) -> axum::response::Response {
    let token = state.tokens.generate(user).unwrap();
    let req = Request::builder()
      .method("GET")
      .uri(uri)
      .header(header::COOKIE, format!("auth_token={token}"))
      .header("hx-request", "true")
      .body(Body::empty())
      .unwrap();
    router(state.clone()).oneshot(req).await.unwrap()
  }

  async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
      .await
      .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
  }

  async fn create_project(state: &AppState, user: &str, name: &str, stage: &str) -> i64 {
    let resp = send(
      state,
      "POST",
      "/projects",
      Some(user),
      Some(&format!("short_name={name}&stage={stage}&rating=0")),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let name = name.to_owned();
    state
      .db
      .call(move |conn| {
        Ok(conn.query_row(
          "SELECT id FROM projects WHERE short_name = ?1",
          rusqlite::params![name],
          |r| r.get(0),
        )?)
      })
      .await
      .unwrap()
  }

  // ── Auth flow ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn unauthenticated_home_redirects_to_login() {
    let state = make_state().await;
    let resp = send(&state, "GET", "/", None, None).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()[header::LOCATION], "/login");
  }

  #[tokio::test]
  async fn login_round_trip() {
    let state = make_state().await;
    let resp = send(
      &state,
      "POST",
      "/login",
      None,
      Some("username=carol&password=secret"),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert!(resp.headers().contains_key(header::SET_COOKIE));
  }

  // ── Projects ────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn created_project_appears_on_home() {
    let state = make_state().await;
    create_project(&state, "alice", "nook", "idea").await;

    let home = body_string(send(&state, "GET", "/", Some("alice"), None).await).await;
    assert!(home.contains("nook"));
  }

  #[tokio::test]
  async fn create_requires_a_name() {
    let state = make_state().await;
    let resp = send(
      &state,
      "POST",
      "/projects",
      Some("alice"),
      Some("short_name=&stage=idea&rating=0"),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn share_group_scopes_project_detail() {
    let state = make_state().await;
    let id = create_project(&state, "alice", "nook", "idea").await;

    let resp = send(&state, "GET", &format!("/projects/{id}"), Some("bob"), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_string(resp).await.contains("nook"));

    let resp = send(&state, "GET", &format!("/projects/{id}"), Some("carol"), None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn stage_filter_returns_partial_for_htmx() {
    let state = make_state().await;
    create_project(&state, "alice", "early", "idea").await;
    create_project(&state, "alice", "shipped", "released").await;

    let resp = send_hx(&state, "/?stage=released&type=&rating=", "alice").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let partial = body_string(resp).await;
    assert!(partial.contains("shipped"));
    assert!(!partial.contains("early"));
    // Partial, not a full page.
    assert!(!partial.contains("<html"));
  }

  #[tokio::test]
  async fn type_and_rating_filters_apply() {
    let state = make_state().await;
    send(
      &state,
      "POST",
      "/projects",
      Some("alice"),
      Some("short_name=oss&stage=idea&rating=4&is_open_source=on"),
    )
    .await;
    send(
      &state,
      "POST",
      "/projects",
      Some("alice"),
      Some("short_name=closed&stage=idea&rating=2"),
    )
    .await;

    let partial = body_string(send_hx(&state, "/?type=open-source&stage=&rating=", "alice").await).await;
    assert!(partial.contains("oss"));
    assert!(!partial.contains("closed"));

    let partial = body_string(send_hx(&state, "/?stage=&type=&rating=2", "alice").await).await;
    assert!(partial.contains("closed"));
    assert!(!partial.contains("oss"));
  }

  #[tokio::test]
  async fn partner_can_edit_and_stranger_cannot() {
    let state = make_state().await;
    let id = create_project(&state, "alice", "nook", "idea").await;

    // bob (same share group) renames it.
    let resp = send(
      &state,
      "PUT",
      &format!("/projects/{id}"),
      Some("bob"),
      Some("short_name=nook2&stage=planning&rating=3"),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
      resp.headers()["hx-redirect"],
      format!("/projects/{id}").as_str()
    );

    let detail = body_string(send(&state, "GET", &format!("/projects/{id}"), Some("alice"), None).await).await;
    assert!(detail.contains("nook2"));
    assert!(detail.contains("planning"));

    // carol's update is a scoped no-op.
    send(
      &state,
      "PUT",
      &format!("/projects/{id}"),
      Some("carol"),
      Some("short_name=hijacked&stage=archived&rating=0"),
    )
    .await;
    let detail = body_string(send(&state, "GET", &format!("/projects/{id}"), Some("alice"), None).await).await;
    assert!(detail.contains("nook2"));
    assert!(!detail.contains("hijacked"));
  }

  #[tokio::test]
  async fn inline_stage_update_is_scoped() {
    let state = make_state().await;
    let id = create_project(&state, "alice", "nook", "idea").await;

    let resp = send(
      &state,
      "PUT",
      &format!("/projects/{id}/stage"),
      Some("bob"),
      Some("stage=development"),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    send(
      &state,
      "PUT",
      &format!("/projects/{id}/stage"),
      Some("carol"),
      Some("stage=archived"),
    )
    .await;

    let stage: String = state
      .db
      .call(move |conn| {
        Ok(conn.query_row(
          "SELECT stage FROM projects WHERE id = ?1",
          rusqlite::params![id],
          |r| r.get(0),
        )?)
      })
      .await
      .unwrap();
    assert_eq!(stage, "development");
  }

  #[tokio::test]
  async fn delete_project_is_scoped() {
    let state = make_state().await;
    let id = create_project(&state, "alice", "nook", "idea").await;

    send(&state, "DELETE", &format!("/projects/{id}"), Some("carol"), None).await;
    let resp = send(&state, "GET", &format!("/projects/{id}"), Some("alice"), None).await;
    assert_eq!(resp.status(), StatusCode::OK);

    send(&state, "DELETE", &format!("/projects/{id}"), Some("bob"), None).await;
    let resp = send(&state, "GET", &format!("/projects/{id}"), Some("alice"), None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  // ── Log entries ─────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn timeline_entries_and_replies() {
    let state = make_state().await;
    let id = create_project(&state, "alice", "nook", "idea").await;

    let resp = send(
      &state,
      "POST",
      &format!("/projects/{id}/log"),
      Some("bob"),
      Some("note=Started+research&url=https://example.com"),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let timeline = body_string(resp).await;
    assert!(timeline.contains("Started research"));

    let log_id: i64 = state
      .db
      .call(|conn| Ok(conn.query_row("SELECT id FROM log_entries LIMIT 1", [], |r| r.get(0))?))
      .await
      .unwrap();

    let resp = send(
      &state,
      "POST",
      &format!("/projects/{id}/log/{log_id}/reply"),
      Some("alice"),
      Some("note=Found+a+resource&url="),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let timeline = body_string(resp).await;
    assert!(timeline.contains("Found a resource"));
    assert!(timeline.contains(r#"class="entry nested""#));
  }

  #[tokio::test]
  async fn log_entry_on_foreign_project_is_rejected() {
    let state = make_state().await;
    let id = create_project(&state, "alice", "nook", "idea").await;

    let resp = send(
      &state,
      "POST",
      &format!("/projects/{id}/log"),
      Some("carol"),
      Some("note=spying&url="),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn reply_with_cross_project_parent_is_rejected() {
    let state = make_state().await;
    let first = create_project(&state, "alice", "first", "idea").await;
    let second = create_project(&state, "alice", "second", "idea").await;

    send(
      &state,
      "POST",
      &format!("/projects/{first}/log"),
      Some("alice"),
      Some("note=root&url="),
    )
    .await;
    let log_id: i64 = state
      .db
      .call(|conn| Ok(conn.query_row("SELECT id FROM log_entries LIMIT 1", [], |r| r.get(0))?))
      .await
      .unwrap();

    // The parent belongs to `first`; replying through `second` must fail.
    let resp = send(
      &state,
      "POST",
      &format!("/projects/{second}/log/{log_id}/reply"),
      Some("alice"),
      Some("note=orphan&url="),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn delete_log_entry_is_scoped() {
    let state = make_state().await;
    let id = create_project(&state, "alice", "nook", "idea").await;
    send(
      &state,
      "POST",
      &format!("/projects/{id}/log"),
      Some("alice"),
      Some("note=keep+me&url="),
    )
    .await;
    let log_id: i64 = state
      .db
      .call(|conn| Ok(conn.query_row("SELECT id FROM log_entries LIMIT 1", [], |r| r.get(0))?))
      .await
      .unwrap();

    // carol cannot delete it.
    send(
      &state,
      "DELETE",
      &format!("/projects/{id}/log/{log_id}"),
      Some("carol"),
      None,
    )
    .await;
    let count: i64 = state
      .db
      .call(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM log_entries", [], |r| r.get(0))?))
      .await
      .unwrap();
    assert_eq!(count, 1);

    // bob (shared group) can.
    let resp = send(
      &state,
      "DELETE",
      &format!("/projects/{id}/log/{log_id}"),
      Some("bob"),
      None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_string(resp).await.contains("No entries yet."));
  }
}
