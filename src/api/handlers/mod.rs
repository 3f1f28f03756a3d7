//! HTTP route handlers organized by resource.

/// Health check and fallback
pub mod general;

/// Status lookups: `/orderStatuses`
pub mod order_statuses;

/// Order endpoints: `/orders`
pub mod orders;
