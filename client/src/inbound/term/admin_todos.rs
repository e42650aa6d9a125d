//! Administrative cross-user todo view. Query-only.

use crate::domain::ports::TodoApi;
use crate::domain::{ApiError, Todo, Username};

/// Result of the last successful query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSelection {
    /// Username the collection was queried for.
    pub username: Username,
    /// That user's collection at query time.
    pub todos: Vec<Todo>,
}

/// View state for the operator's cross-user queries.
///
/// This view has no local error slot: every failure, 401 included,
/// propagates to the shared session error. There is no create capability.
#[derive(Debug, Default)]
pub struct AdminTodosView {
    selection: Option<AdminSelection>,
}

impl AdminTodosView {
    /// Last successful query result, if any.
    pub fn selection(&self) -> Option<&AdminSelection> {
        self.selection.as_ref()
    }

    /// Query another user's collection, replacing the selection on success.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] to the caller; the previous selection is
    /// retained on failure.
    pub async fn query(&mut self, api: &dyn TodoApi, username: Username) -> Result<(), ApiError> {
        let todos = api.fetch_todos_for(&username).await?;
        self.selection = Some(AdminSelection { username, todos });
        Ok(())
    }

    /// Reset to no-selection. Performs no network call.
    pub fn clear(&mut self) {
        self.selection = None;
    }
}
