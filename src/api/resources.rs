//! JSON representations exchanged with clients.

use crate::api::links::{Links, SELF_REL};
use crate::entities::{order, order_status};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// An order as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResource {
    /// Order id
    pub order_id: Uuid,
    /// Pizza names
    pub pizzas: Vec<String>,
    /// When the order was created
    pub created_at: DateTime<Utc>,
    /// When the order was last changed
    pub modified_at: DateTime<Utc>,
    /// Hypermedia links
    #[serde(rename = "_links", default, skip_serializing_if = "Links::is_empty")]
    pub links: Links,
}

impl From<order::Model> for OrderResource {
    fn from(model: order::Model) -> Self {
        Self {
            order_id: model.id,
            pizzas: model.pizzas.0,
            created_at: model.created_at,
            modified_at: model.modified_at,
            links: Links::default(),
        }
    }
}

/// A status as returned by the API, also used as the body of status updates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusResource {
    /// Status id
    pub order_status_id: Uuid,
    /// Status name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_status: Option<String>,
    /// Hypermedia links
    #[serde(rename = "_links", default, skip_serializing_if = "Links::is_empty")]
    pub links: Links,
}

impl From<order_status::Model> for OrderStatusResource {
    fn from(model: order_status::Model) -> Self {
        Self {
            order_status_id: model.id,
            order_status: Some(model.name),
            links: Links::default(),
        }
    }
}

/// Body of `POST /orders`
///
/// A missing or null `pizzas` field is read as an empty list and rejected by validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    /// Pizza names to order
    #[serde(default)]
    pub pizzas: Option<Vec<String>>,
}

/// Body of `PUT /orders/{id}/orderStatus`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusRequest {
    /// Target status id (required)
    #[serde(default)]
    pub order_status_id: Option<Uuid>,
    /// Status name, echoed back but otherwise ignored
    #[serde(default)]
    pub order_status: Option<String>,
}

/// HAL collection: `{"_embedded": {"<name>": [...]}, "_links": {...}}`
#[derive(Debug, Clone, Serialize)]
pub struct CollectionResource<T> {
    /// Items keyed by collection name
    #[serde(rename = "_embedded")]
    pub embedded: BTreeMap<&'static str, Vec<T>>,
    /// Hypermedia links
    #[serde(rename = "_links")]
    pub links: Links,
}

impl<T> CollectionResource<T> {
    /// Wraps `items` under `name` with a self link to `href`.
    pub fn new(name: &'static str, items: Vec<T>, href: String) -> Self {
        let mut links = Links::default();
        links.insert(SELF_REL, href);
        Self {
            embedded: BTreeMap::from([(name, items)]),
            links,
        }
    }
}
