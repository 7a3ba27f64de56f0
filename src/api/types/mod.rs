//! API response and request types for the WhatTheGovDoin REST API.
//!
//! The generic query client returns untyped JSON; these types are used by the
//! per-route helpers on [`QueryClient`](crate::api::QueryClient).

pub mod health;
pub mod issue;
pub mod search;
pub mod summary;

// Re-export all types for convenience
pub use health::*;
pub use issue::*;
pub use search::*;
pub use summary::*;
