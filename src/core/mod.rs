//! Core business logic - framework-agnostic order and status operations.
//!
//! Functions here take a database connection and return bare entity models; HTTP
//! concerns (status codes, links) live in [`crate::api`].

/// Order creation, lookups and the kitchen workflow
pub mod order;
/// Status lookups and name resolution
pub mod order_status;
