//! Core types shared by every nook application.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! It holds the user roster and its visibility-set resolver, the common
//! application configuration shape, and changelog loading.

pub mod changelog;
pub mod config;
pub mod error;
pub mod roster;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use roster::{Roster, RosterEntry, VisibilitySet};
