//! Terminal surface: views, rendering, and the interactive command loop.

pub mod admin_todos;
pub mod render;
pub mod repl;
pub mod user_todos;
pub mod view_select;

pub use self::admin_todos::AdminTodosView;
pub use self::repl::Repl;
pub use self::user_todos::UserTodosView;
pub use self::view_select::ActiveView;
