//! Order status entity - A named lifecycle stage referenced by orders.
//!
//! The names form a conventional closed set (see [`crate::core::order_status::StatusName`])
//! maintained by seed data; the table itself does not constrain them.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order status database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "order_statuses")]
pub struct Model {
    /// Unique identifier for the status
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Status name (e.g. `"RECEIVED"`, `"PROCESSING"`)
    pub name: String,
}

/// Defines relationships between `OrderStatus` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One status is referenced by many orders
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
