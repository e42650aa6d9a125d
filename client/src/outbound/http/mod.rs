//! Reqwest-backed adapter for the todo API port.

mod classify;
mod todo_api;

pub use self::todo_api::{HttpTodoApi, XsrfPolicy};
pub(crate) use self::todo_api::ensure_trailing_slash;
