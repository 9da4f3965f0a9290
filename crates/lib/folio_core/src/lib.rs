//! # folio_core
//!
//! Chat domain for a portfolio assistant: the conversation model, the
//! persona it speaks as, the hosted completion provider, and the client-side
//! widget state.

pub mod chat;
pub mod persona;
pub mod provider;

/// Version reported by the API health check.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
