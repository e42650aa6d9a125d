//! Terminal client for an identity-aware todo application.
//!
//! The core is the session-bootstrap and authentication-recovery protocol:
//! silent non-interactive login first, an interactive-login navigation as the
//! fallback, and any 401 re-entering that sequence. Around it sit a thin
//! HTTP adapter ([`outbound`]), the session state machine and its service
//! ([`domain`]), and the terminal views ([`inbound`]).

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
