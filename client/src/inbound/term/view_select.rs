//! Role-driven view selection.

use super::admin_todos::AdminTodosView;
use super::user_todos::UserTodosView;
use crate::domain::Role;

/// The todo view currently on screen.
#[derive(Debug, Default)]
pub enum ActiveView {
    /// Groups not resolved yet (or session invalid): nothing renders.
    #[default]
    Pending,
    /// Self-service view.
    User(UserTodosView),
    /// Administrative cross-user view.
    Admin(AdminTodosView),
}

impl ActiveView {
    /// Reconcile the view against the role derived on this render.
    ///
    /// An unchanged role keeps the existing view instance and its state; a
    /// remount happens only when the role actually flips. The role itself is
    /// re-derived from raw claims on every call, never cached here.
    pub fn reconcile(self, role: Option<Role>) -> Self {
        match (self, role) {
            (view @ Self::User(_), Some(Role::Member)) => view,
            (view @ Self::Admin(_), Some(Role::Operator)) => view,
            (_, None) => Self::Pending,
            (_, Some(Role::Member)) => Self::User(UserTodosView::default()),
            (_, Some(Role::Operator)) => Self::Admin(AdminTodosView::default()),
        }
    }
}
