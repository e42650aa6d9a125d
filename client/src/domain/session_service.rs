//! Session orchestration: bootstrap, silent login, refresh, logout.
//!
//! The service owns the [`Session`] value and is the only writer to it.
//! Browser-style full-page navigations are expressed as [`Navigation`]
//! values; executing one is the caller's job and ends this instance of the
//! state machine.
//!
//! User fetches are generation-stamped: each fetch increments a counter and a
//! result is only applied while its generation is still the latest, so a
//! stale response can never overwrite a newer one even when a manual refresh
//! races the periodic timer.

use std::sync::Arc;

use url::Url;

use super::error::ApiError;
use super::ports::TodoApi;
use super::session::Session;
use super::user::UserDetails;

/// Full-page navigation targets resolved at startup.
#[derive(Debug, Clone)]
pub struct NavigationTargets {
    /// Interactive login endpoint of the access-management layer.
    pub interactive_login: Url,
    /// Global logout endpoint terminating the upstream session.
    pub global_logout: Url,
    /// Home page navigated to after a scoped logout.
    pub home: Url,
}

/// A navigation the caller must perform; terminal for this instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Hand control to the interactive login endpoint.
    InteractiveLogin(Url),
    /// Terminate the global session.
    GlobalLogout(Url),
    /// Return to the home page after a scoped logout.
    Home(Url),
}

/// Owns the session state machine and drives it through the [`TodoApi`] port.
pub struct SessionService {
    api: Arc<dyn TodoApi>,
    targets: NavigationTargets,
    session: Session,
    latest_generation: u64,
}

impl SessionService {
    /// Build a service over an API port and resolved navigation targets.
    pub fn new(api: Arc<dyn TodoApi>, targets: NavigationTargets) -> Self {
        Self {
            api,
            targets,
            session: Session::new(),
            latest_generation: 0,
        }
    }

    /// Current session state.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Stamp a new user fetch, invalidating any still-outstanding one.
    pub fn begin_user_fetch(&mut self) -> u64 {
        self.latest_generation += 1;
        self.latest_generation
    }

    /// Apply a user-fetch result if its generation is still the latest.
    ///
    /// Returns whether the result was applied; a stale result is discarded
    /// without touching the session.
    pub fn apply_user_fetch(
        &mut self,
        generation: u64,
        result: Result<UserDetails, ApiError>,
    ) -> bool {
        if generation != self.latest_generation {
            tracing::debug!(generation, "discarding stale user fetch result");
            return false;
        }
        self.session.apply_user_result(result);
        true
    }

    /// Fetch the current user and apply the outcome.
    ///
    /// Used for the on-load bootstrap, the manual refresh action, and the
    /// periodic refresh tick alike.
    pub async fn refresh(&mut self) {
        let generation = self.begin_user_fetch();
        let api = Arc::clone(&self.api);
        let result = api.fetch_user().await;
        self.apply_user_fetch(generation, result);
    }

    /// Attempt silent session establishment, falling back to a redirect.
    ///
    /// Probes the non-interactive login endpoint first. The probe response is
    /// not readable by design; only network-level rejection signals failure.
    /// On probe success the user is re-fetched: success authenticates without
    /// surrendering control, while any failure (including a 401 because no
    /// upstream session existed) yields the interactive-login navigation
    /// without recording an error.
    pub async fn log_in(&mut self) -> Option<Navigation> {
        if self.api.probe_non_interactive_login().await.is_err() {
            return Some(Navigation::InteractiveLogin(
                self.targets.interactive_login.clone(),
            ));
        }

        let generation = self.begin_user_fetch();
        let api = Arc::clone(&self.api);
        match api.fetch_user().await {
            Ok(details) => {
                self.apply_user_fetch(generation, Ok(details));
                None
            }
            Err(_) => Some(Navigation::InteractiveLogin(
                self.targets.interactive_login.clone(),
            )),
        }
    }

    /// Terminate the global session via full-page navigation.
    pub fn log_out(&self) -> Navigation {
        Navigation::GlobalLogout(self.targets.global_logout.clone())
    }

    /// Terminate this app's session only, then navigate home.
    pub async fn log_out_this_app(&mut self) -> Navigation {
        if let Err(error) = self.api.end_app_session().await {
            // Ignored by contract: navigation home proceeds regardless.
            tracing::warn!(%error, "scoped logout call failed");
        }
        self.session = Session::new();
        Navigation::Home(self.targets.home.clone())
    }

    /// Record a failure raised by a view (admin query, own-todos load).
    pub fn report_failure(&mut self, error: ApiError) {
        self.session.record_failure(error);
    }

    /// Manually dismiss a retained failure.
    pub fn dismiss_error(&mut self) {
        self.session.dismiss_error();
    }
}
