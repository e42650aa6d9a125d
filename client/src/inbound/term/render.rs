//! Pure rendering of session and view state to terminal text.
//!
//! Every function here returns a `String` and touches no I/O, so the full
//! screen composition is directly assertable in tests.

use super::admin_todos::AdminTodosView;
use super::user_todos::UserTodosView;
use super::view_select::ActiveView;
use crate::domain::{Session, SessionError, Todo, UserDetails};

const HEADING: &str = "Identity-aware todo client";

/// Compose the full screen for the current state.
pub fn screen(session: &Session, view: &ActiveView) -> String {
    let mut out = String::new();
    out.push_str(HEADING);
    out.push_str("\n\n");

    if session.is_invalid() {
        out.push_str("Log in to see your todos.\n");
        out.push_str("Commands: login | quit\n");
        return out;
    }

    if let Some(SessionError::Failure(error)) = session.error() {
        out.push_str("Error:\n");
        out.push_str(&error.to_string());
        out.push_str("\n(clear to dismiss)\n\n");
    }

    out.push_str("User details:\n");
    out.push_str(&user_details(session.user()));
    out.push('\n');

    match view {
        ActiveView::Pending => {}
        ActiveView::User(user_view) => {
            out.push('\n');
            out.push_str(&user_todos_block(user_view));
        }
        ActiveView::Admin(admin_view) => {
            out.push('\n');
            out.push_str(&admin_todos_block(admin_view));
        }
    }

    out.push('\n');
    out.push_str(&command_hints(view));
    out
}

/// Serialized user details, matching the wire payload shape.
pub fn user_details(user: &UserDetails) -> String {
    serde_json::to_string_pretty(user).unwrap_or_else(|_| "{}".to_owned())
}

/// Render one todo collection; explicit placeholder when empty.
pub fn todo_list(todos: &[Todo]) -> String {
    if todos.is_empty() {
        return "No todos\n".to_owned();
    }
    let mut out = String::new();
    for todo in todos {
        out.push_str("  - ");
        out.push_str(todo.content.as_ref());
        out.push('\n');
    }
    out
}

fn user_todos_block(view: &UserTodosView) -> String {
    let mut out = String::from("Todos:\n");
    out.push_str(&todo_list(view.todos()));
    if let Some(error) = view.create_error() {
        out.push_str(&error.to_string());
        out.push('\n');
    }
    out
}

fn admin_todos_block(view: &AdminTodosView) -> String {
    let mut out = String::from("Todos Administration:\n");
    match view.selection() {
        Some(selection) => {
            out.push_str("Todos for ");
            out.push_str(selection.username.as_ref());
            out.push_str(":\n");
            out.push_str(&todo_list(&selection.todos));
        }
        None => out.push_str("No user queried. Use: query <username>\n"),
    }
    out
}

fn command_hints(view: &ActiveView) -> String {
    let mut hints = vec!["refresh", "logout", "logout-app", "clear"];
    match view {
        ActiveView::Pending => {}
        ActiveView::User(_) => hints.push("add <content>"),
        ActiveView::Admin(_) => {
            hints.push("query <username>");
            hints.push("reset");
        }
    }
    hints.push("quit");
    format!("Commands: {}\n", hints.join(" | "))
}
