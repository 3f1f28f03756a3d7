//! Hypermedia link decoration.
//!
//! Resources carry HAL-style `_links` (`{"self": {"href": "..."}}`). Links are a
//! presentation concern only: the core never sees them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Relation name of a resource's own link.
pub const SELF_REL: &str = "self";
/// Relation name of an order's status link.
pub const ORDER_STATUS_REL: &str = "orderStatus";

/// A single link target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Absolute URL, or a path when no base URL is configured
    pub href: String,
}

/// Links keyed by relation name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Links(BTreeMap<String, Link>);

impl Links {
    /// Adds (or replaces) the link for `rel`.
    pub fn insert(&mut self, rel: &str, href: String) {
        self.0.insert(rel.to_string(), Link { href });
    }

    /// Target of the link for `rel`, if present.
    #[must_use]
    pub fn href(&self, rel: &str) -> Option<&str> {
        self.0.get(rel).map(|link| link.href.as_str())
    }

    /// Whether no link has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Builds the URLs of every resource the API exposes.
#[derive(Debug, Clone, Default)]
pub struct LinkBuilder {
    base_url: String,
}

impl LinkBuilder {
    /// Creates a builder prefixing every path with `base_url` (trailing slashes dropped).
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `/orders`
    #[must_use]
    pub fn orders(&self) -> String {
        self.url("/orders")
    }

    /// `/orders/{id}`
    #[must_use]
    pub fn order(&self, order_id: Uuid) -> String {
        self.url(&format!("/orders/{order_id}"))
    }

    /// `/orders/{id}/orderStatus`
    #[must_use]
    pub fn order_status_for_order(&self, order_id: Uuid) -> String {
        self.url(&format!("/orders/{order_id}/orderStatus"))
    }

    /// `/orderStatuses`
    #[must_use]
    pub fn order_statuses(&self) -> String {
        self.url("/orderStatuses")
    }

    /// `/orderStatuses/{id}`
    #[must_use]
    pub fn order_status(&self, status_id: Uuid) -> String {
        self.url(&format!("/orderStatuses/{status_id}"))
    }
}
