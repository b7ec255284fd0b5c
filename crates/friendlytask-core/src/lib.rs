//! Cross-cutting runtime pieces shared by FriendlyTask services:
//! tracing setup, health endpoints, request-id middleware, serde helpers.

pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
