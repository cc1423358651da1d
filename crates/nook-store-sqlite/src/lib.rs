//! SQLite backend shared by the nook applications.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime, and provides the linear migration
//! runner every application invokes once at startup.

mod db;
mod migrate;

pub mod error;

pub use db::{Db, placeholders};
pub use error::{Error, Result};
pub use migrate::migration_name;

#[cfg(test)]
mod tests;
