//! Driven port for the todo API.
//!
//! The domain owns the call surface so the session service and views stay
//! adapter-agnostic; the HTTP adapter in `outbound` is one implementation.

use async_trait::async_trait;

use super::error::{ApiError, CreateTodoError};
use super::todo::Todo;
use super::user::{UserDetails, Username};

/// Port over the identity-aware todo API.
///
/// Every method corresponds to one wire operation. Read calls classify
/// responses into [`ApiError`]; the create path has its own display-only
/// error type by contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoApi: Send + Sync {
    /// `GET /user`: resolve the current identity.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use todo_client::domain::ports::{FixtureTodoApi, TodoApi};
    ///
    /// let api = FixtureTodoApi;
    /// let details = api.fetch_user().await?;
    /// assert!(details.username.is_none());
    /// # Ok::<(), todo_client::domain::ApiError>(())
    /// ```
    async fn fetch_user(&self) -> Result<UserDetails, ApiError>;

    /// `GET /todos`: the caller's own collection.
    async fn fetch_own_todos(&self) -> Result<Vec<Todo>, ApiError>;

    /// `GET /todos/{username}`: another user's collection (operator only;
    /// enforcement is server-side, the client merely hides the view).
    async fn fetch_todos_for(&self, username: &Username) -> Result<Vec<Todo>, ApiError>;

    /// `POST /todos`: create one todo. Any non-2xx is a rejection.
    async fn create_todo(&self, todo: &Todo) -> Result<(), CreateTodoError>;

    /// `GET /login/non-interactive`: silent session bootstrap probe.
    ///
    /// Only network-level success or failure is meaningful; the response
    /// itself is never inspected.
    async fn probe_non_interactive_login(&self) -> Result<(), ApiError>;

    /// `GET /pa/oidc/logout`: terminate this app's session only.
    async fn end_app_session(&self) -> Result<(), ApiError>;
}

/// Fixture implementation answering every call with an empty success.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureTodoApi;

#[async_trait]
impl TodoApi for FixtureTodoApi {
    async fn fetch_user(&self) -> Result<UserDetails, ApiError> {
        Ok(UserDetails::empty())
    }

    async fn fetch_own_todos(&self) -> Result<Vec<Todo>, ApiError> {
        Ok(Vec::new())
    }

    async fn fetch_todos_for(&self, _username: &Username) -> Result<Vec<Todo>, ApiError> {
        Ok(Vec::new())
    }

    async fn create_todo(&self, _todo: &Todo) -> Result<(), CreateTodoError> {
        Ok(())
    }

    async fn probe_non_interactive_login(&self) -> Result<(), ApiError> {
        Ok(())
    }

    async fn end_app_session(&self) -> Result<(), ApiError> {
        Ok(())
    }
}
