//! Session state and its transitions.
//!
//! The session pairs the last resolved identity with an optional error slot.
//! The slot distinguishes the invalid-session sentinel (no user resolved yet,
//! or the server rejected the session) from a retained failure; the sentinel
//! is what gates the login prompt, while failures are shown until dismissed.

use super::error::ApiError;
use super::user::UserDetails;

/// Error slot content: the distinguished sentinel or a retained failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// No user resolved yet, or the server answered 401.
    Invalid,
    /// A non-401 failure, retained until manually dismissed.
    Failure(ApiError),
}

/// Coarse session phase derived for rendering and refresh gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Machine started, first user fetch not yet resolved.
    Unresolved,
    /// A user fetch succeeded and no error is retained.
    Authenticated,
    /// The server rejected the session; login prompt is shown.
    Unauthenticated,
    /// A non-401 failure is retained alongside any previous identity.
    Failed,
}

/// Current session: last resolved identity plus the error slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user: UserDetails,
    error: Option<SessionError>,
    resolved: bool,
}

impl Session {
    /// Fresh session: empty identity, invalid sentinel, nothing resolved.
    pub const fn new() -> Self {
        Self {
            user: UserDetails::empty(),
            error: Some(SessionError::Invalid),
            resolved: false,
        }
    }

    /// Last resolved identity; the empty record before the first success.
    pub fn user(&self) -> &UserDetails {
        &self.user
    }

    /// Retained error slot content, if any.
    pub fn error(&self) -> Option<&SessionError> {
        self.error.as_ref()
    }

    /// Whether the invalid sentinel is set (login prompt must render).
    pub fn is_invalid(&self) -> bool {
        matches!(self.error, Some(SessionError::Invalid))
    }

    /// Derive the coarse phase.
    pub fn phase(&self) -> SessionPhase {
        match (&self.error, self.resolved) {
            (Some(SessionError::Invalid), false) => SessionPhase::Unresolved,
            (Some(SessionError::Invalid), true) => SessionPhase::Unauthenticated,
            (Some(SessionError::Failure(_)), _) => SessionPhase::Failed,
            (None, _) => SessionPhase::Authenticated,
        }
    }

    /// Apply the outcome of a user fetch.
    ///
    /// Success replaces the identity and clears the error slot. A 401 sets
    /// the invalid sentinel. Any other failure is retained while the previous
    /// identity, if any, is kept.
    pub fn apply_user_result(&mut self, result: Result<UserDetails, ApiError>) {
        self.resolved = true;
        match result {
            Ok(details) => {
                self.user = details;
                self.error = None;
            }
            Err(error) => self.record_failure(error),
        }
    }

    /// Record a failure raised outside the user-fetch path (for example an
    /// admin query): 401 maps to the sentinel, anything else is retained.
    pub fn record_failure(&mut self, error: ApiError) {
        self.resolved = true;
        if error.is_session_invalid() {
            self.error = Some(SessionError::Invalid);
        } else {
            self.error = Some(SessionError::Failure(error));
        }
    }

    /// Manually dismiss a retained failure.
    ///
    /// Clears only the failure: the invalid sentinel is not dismissible, and
    /// the authenticated/unauthenticated distinction never changes here.
    pub fn dismiss_error(&mut self) {
        if matches!(self.error, Some(SessionError::Failure(_))) {
            self.error = None;
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
