//! Todo data model.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum content length accepted by the server's bean validation.
pub const TODO_CONTENT_MAX: usize = 256;

/// Validation errors returned by [`TodoContent::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoValidationError {
    /// Content was missing or blank once trimmed.
    EmptyContent,
    /// Content exceeded the server-side limit.
    ContentTooLong {
        /// Maximum number of characters allowed.
        max: usize,
    },
}

impl fmt::Display for TodoValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "todo content must not be empty"),
            Self::ContentTooLong { max } => {
                write!(f, "todo content must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for TodoValidationError {}

/// Validated todo content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TodoContent(String);

impl TodoContent {
    /// Validate and construct [`TodoContent`] from owned input.
    pub fn new(content: impl Into<String>) -> Result<Self, TodoValidationError> {
        Self::from_owned(content.into())
    }

    fn from_owned(content: String) -> Result<Self, TodoValidationError> {
        if content.trim().is_empty() {
            return Err(TodoValidationError::EmptyContent);
        }
        if content.chars().count() > TODO_CONTENT_MAX {
            return Err(TodoValidationError::ContentTooLong {
                max: TODO_CONTENT_MAX,
            });
        }
        Ok(Self(content))
    }
}

impl AsRef<str> for TodoContent {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for TodoContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<TodoContent> for String {
    fn from(value: TodoContent) -> Self {
        value.0
    }
}

impl TryFrom<String> for TodoContent {
    type Error = TodoValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// One todo item.
///
/// The id is generated client-side before the create request goes out, so the
/// optimistic local append after acknowledgment needs no reconciliation with
/// the response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Client-generated stable identifier.
    pub id: Uuid,
    /// Validated content.
    pub content: TodoContent,
}

impl Todo {
    /// Build a todo with a freshly generated v4 id.
    pub fn new(content: TodoContent) -> Self {
        Self {
            id: Uuid::new_v4(),
            content,
        }
    }
}

/// Wire shape of `GET /todos` and `GET /todos/{username}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TodoList {
    /// Ordered todos for the queried user.
    #[serde(default)]
    pub todos: Vec<Todo>,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn rejects_blank_content(#[case] raw: &str) {
        let err = TodoContent::new(raw).expect_err("blank content must fail");
        assert_eq!(err, TodoValidationError::EmptyContent);
    }

    #[test]
    fn rejects_oversized_content() {
        let err = TodoContent::new("x".repeat(TODO_CONTENT_MAX + 1))
            .expect_err("oversized content must fail");
        assert_eq!(
            err,
            TodoValidationError::ContentTooLong {
                max: TODO_CONTENT_MAX
            }
        );
    }

    #[test]
    fn fresh_todos_get_distinct_ids() {
        let content = TodoContent::new("buy milk").expect("valid content");
        let first = Todo::new(content.clone());
        let second = Todo::new(content);
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn todo_serializes_to_wire_shape() {
        let todo = Todo {
            id: Uuid::nil(),
            content: TodoContent::new("buy milk").expect("valid content"),
        };
        let rendered = serde_json::to_string(&todo).expect("serialize");
        assert_eq!(
            rendered,
            r#"{"id":"00000000-0000-0000-0000-000000000000","content":"buy milk"}"#
        );
    }

    #[test]
    fn list_without_todos_key_is_empty() {
        let list: TodoList = serde_json::from_str("{}").expect("empty list");
        assert!(list.todos.is_empty());
    }
}
