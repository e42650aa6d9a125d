//! Domain types, ports, and session orchestration.
//!
//! Purpose: strongly typed session/user/todo entities, the error taxonomy,
//! the driven port over the todo API, and the session service that owns the
//! authentication state machine. Everything here is transport agnostic; the
//! HTTP adapter lives in `outbound` and the terminal surface in `inbound`.

pub mod error;
pub mod ports;
pub mod session;
pub mod session_service;
pub mod todo;
pub mod user;

pub use self::error::{ApiError, CreateTodoError};
pub use self::session::{Session, SessionError, SessionPhase};
pub use self::session_service::{Navigation, NavigationTargets, SessionService};
pub use self::todo::{Todo, TodoContent, TodoList, TodoValidationError};
pub use self::user::{Role, UserDetails, Username, UsernameValidationError};
