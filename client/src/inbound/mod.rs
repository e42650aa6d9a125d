//! Inbound adapters that translate operator input into domain calls while
//! keeping presentation detail at the edge.
//!
//! The terminal surface lives under [`term`]; a future inbound surface (for
//! example a TUI) would sit alongside it.

pub mod term;
