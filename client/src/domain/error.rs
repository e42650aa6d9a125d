//! Error taxonomy for calls against the todo API.
//!
//! These errors are transport agnostic: the HTTP adapter maps wire-level
//! outcomes onto them and everything above reasons about the variants only.
//! `SessionInvalid` is deliberately its own variant rather than a status code
//! wrapped in a generic error, because it alone drives re-authentication.

/// Failure produced by any read call against the todo API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The server rejected the session (HTTP 401). Drives re-authentication.
    #[error("session invalid")]
    SessionInvalid,
    /// The response carried an unexpected content type. The full dump is
    /// retained verbatim for diagnostics.
    #[error("unexpected response from {endpoint}\n\n{status} {status_text}\n{headers}\n\n{body}")]
    UnexpectedResponse {
        /// Endpoint the request was issued against.
        endpoint: String,
        /// HTTP status code.
        status: u16,
        /// Canonical status text for the code.
        status_text: String,
        /// Response headers serialized one per line.
        headers: String,
        /// Raw body text, verbatim.
        body: String,
    },
    /// The call failed below HTTP (connection refused, TLS, DNS, ...).
    #[error("transport failure: {message}")]
    Transport {
        /// Human-readable transport failure description.
        message: String,
    },
    /// A response that declared itself JSON could not be decoded.
    #[error("response decode failed: {message}")]
    Decode {
        /// Human-readable decode failure description.
        message: String,
    },
}

impl ApiError {
    /// Build an [`ApiError::UnexpectedResponse`] from response parts.
    pub fn unexpected_response(
        endpoint: impl Into<String>,
        status: u16,
        status_text: impl Into<String>,
        headers: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self::UnexpectedResponse {
            endpoint: endpoint.into(),
            status,
            status_text: status_text.into(),
            headers: headers.into(),
            body: body.into(),
        }
    }

    /// Build an [`ApiError::Transport`] from any displayable source.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Build an [`ApiError::Decode`] from any displayable source.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Return whether this error must bubble up as a session transition.
    pub fn is_session_invalid(&self) -> bool {
        matches!(self, Self::SessionInvalid)
    }
}

/// Failure producing a todo via `POST /todos`.
///
/// Create-path errors are display-only by contract: even a 401 on create is
/// surfaced inline next to the form and never forces a session transition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CreateTodoError {
    /// The server answered with a non-2xx status.
    #[error("error response creating todo: {status} - {status_text}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Canonical status text for the code.
        status_text: String,
    },
    /// The call failed below HTTP.
    #[error("transport failure creating todo: {message}")]
    Transport {
        /// Human-readable transport failure description.
        message: String,
    },
}

impl CreateTodoError {
    /// Build a [`CreateTodoError::Rejected`] from response parts.
    pub fn rejected(status: u16, status_text: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            status_text: status_text.into(),
        }
    }

    /// Build a [`CreateTodoError::Transport`] from any displayable source.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }
}
