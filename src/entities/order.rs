//! Order entity - A customer request for one or more pizzas.
//!
//! Each order stores its pizza names as a JSON array, a nullable reference to its
//! current status, and creation/modification timestamps maintained on every save.

use sea_orm::{FromJsonQueryResult, Set, entity::prelude::*};
use serde::{Deserialize, Serialize};

/// Ordered list of pizza names, persisted as a JSON column
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct Pizzas(pub Vec<String>);

/// Order database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// Unique identifier, generated at creation
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Pizza names in the order they were requested
    #[sea_orm(column_type = "Json")]
    pub pizzas: Pizzas,
    /// Current lifecycle stage; `None` only for rows written outside the core
    pub order_status_id: Option<Uuid>,
    /// When the order was first persisted
    pub created_at: DateTimeUtc,
    /// When the order was last persisted
    pub modified_at: DateTimeUtc,
}

/// Defines relationships between Order and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each order points at one status
    #[sea_orm(
        belongs_to = "super::order_status::Entity",
        from = "Column::OrderStatusId",
        to = "super::order_status::Column::Id"
    )]
    OrderStatus,
}

impl Related<super::order_status::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderStatus.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let now = chrono::Utc::now();
        if insert && self.created_at.is_not_set() {
            self.created_at = Set(now);
        }
        self.modified_at = Set(now);
        Ok(self)
    }
}
