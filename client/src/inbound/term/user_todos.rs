//! Self-service todo view.

use crate::domain::ports::TodoApi;
use crate::domain::{ApiError, CreateTodoError, Todo, TodoContent};

/// View state for the caller's own todo collection.
///
/// Create-path failures are recorded here, inline, and never touch the
/// session; a failed load, by contrast, is returned to the caller so it can
/// reach the shared session error slot.
#[derive(Debug, Default)]
pub struct UserTodosView {
    todos: Vec<Todo>,
    create_error: Option<CreateTodoError>,
    loaded: bool,
    load_attempted: bool,
}

impl UserTodosView {
    /// Whether the initial collection fetch has succeeded.
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Whether the initial collection fetch has been issued, regardless of
    /// outcome. The fetch runs once per view activation; there is no
    /// automatic retry.
    pub const fn load_attempted(&self) -> bool {
        self.load_attempted
    }

    /// Current local collection.
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    /// Inline create failure, if any.
    pub fn create_error(&self) -> Option<&CreateTodoError> {
        self.create_error.as_ref()
    }

    /// Fetch the caller's own collection; runs once per view activation.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] so the caller can surface it on the
    /// session (a 401 here must trigger re-authentication). A failed load
    /// still counts as the activation's one attempt.
    pub async fn load(&mut self, api: &dyn TodoApi) -> Result<(), ApiError> {
        self.load_attempted = true;
        let todos = api.fetch_own_todos().await?;
        self.todos = todos;
        self.loaded = true;
        Ok(())
    }

    /// Create a todo with a freshly generated id.
    ///
    /// The input form is considered cleared by the caller regardless of the
    /// outcome. On acknowledgment the todo is appended to the local
    /// collection as-is; on rejection the prior collection is retained and
    /// the failure recorded for inline display only.
    pub async fn create(&mut self, api: &dyn TodoApi, content: TodoContent) {
        let todo = Todo::new(content);
        match api.create_todo(&todo).await {
            Ok(()) => {
                self.todos.push(todo);
                self.create_error = None;
            }
            Err(error) => self.create_error = Some(error),
        }
    }
}
