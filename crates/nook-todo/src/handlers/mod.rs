//! HTTP handlers for the todo-list app.

pub mod items;
pub mod session;
pub mod stores;
