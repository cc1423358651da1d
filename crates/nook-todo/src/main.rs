//! todo-list server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the SQLite
//! database, runs migrations, and serves the app.
//!
//! # Password hash generation
//!
//! To generate the argon2 PHC string for a roster entry's `password_hash`:
//!
//! ```text
//! cargo run -p nook-todo --bin todo-list -- --hash-password
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use nook_auth::Tokens;
use nook_core::AppConfig;
use nook_store_sqlite::Db;
use nook_todo::{AppState, migrations, router};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

const DEV_JWT_SECRET: &str = "dev-secret-change-in-production";

#[derive(Parser)]
#[command(author, version, about = "nook todo-list server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Print the argon2 hash for a password entered on stdin and exit.
  #[arg(long)]
  hash_password: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  if cli.hash_password {
    let password = read_password_from_stdin()?;
    println!("{}", nook_auth::hash_password(&password)?);
    return Ok(());
  }

  let settings = config::Config::builder()
    .set_default("app_name", "todo-list")?
    .set_default("host", "127.0.0.1")?
    .set_default("port", 3001)?
    .set_default("db_path", "data/todo-list.db")?
    .set_default("jwt_secret", DEV_JWT_SECRET)?
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("NOOK"))
    .build()
    .context("failed to read config file")?;

  let app_config: AppConfig = settings
    .try_deserialize()
    .context("failed to deserialise AppConfig")?;

  if app_config.users.is_empty() {
    tracing::warn!("no users configured; all logins will fail");
  }
  if app_config.jwt_secret == DEV_JWT_SECRET {
    tracing::warn!("using the development JWT secret; set jwt_secret in production");
  }

  let db = Db::open(&app_config.db_path)
    .await
    .with_context(|| format!("failed to open database at {:?}", app_config.db_path))?;

  db.run_migrations(migrations::MIGRATIONS)
    .await
    .context("failed to run migrations")?;

  let address = app_config.listen_address();
  let state = AppState {
    db,
    roster: Arc::new(app_config.users.clone()),
    tokens: Arc::new(Tokens::new(app_config.jwt_secret.clone())),
    config: Arc::new(app_config),
  };

  tracing::info!("todo-list listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, router(state))
    .await
    .context("server error")?;

  Ok(())
}

/// Read a password from stdin (trailing newline stripped).
fn read_password_from_stdin() -> anyhow::Result<String> {
  use std::io::{self, BufRead, Write};
  let stdin = io::stdin();
  print!("Password: ");
  io::stdout().flush().ok();
  let mut line = String::new();
  stdin.lock().read_line(&mut line)?;
  Ok(
    line
      .trim_end_matches('\n')
      .trim_end_matches('\r')
      .to_string(),
  )
}
