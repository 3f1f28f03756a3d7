//! Order status business logic - Status lookups and name resolution.
//!
//! The workflow in [`crate::core::order`] depends on exactly one status row existing
//! for each of RECEIVED, PROCESSING and COMPLETED. [`resolve_order_status_by_name`]
//! checks that on every call rather than caching the rows, so a store that is
//! re-seeded at runtime is picked up immediately.

use crate::{
    entities::{Order, OrderStatus, order_status},
    errors::{Error, Result},
};
use sea_orm::prelude::*;
use std::fmt;
use tracing::{instrument, warn};

/// The lifecycle stages an order can be in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatusName {
    /// Accepted, waiting for the kitchen
    Received,
    /// Currently being made
    Processing,
    /// Done
    Completed,
    /// Abandoned before completion
    Cancelled,
}

impl StatusName {
    /// Every status, in lifecycle order. Used as the default seed set.
    pub const ALL: [Self; 4] = [
        Self::Received,
        Self::Processing,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Name stored in the `order_statuses.name` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Received => "RECEIVED",
            Self::Processing => "PROCESSING",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for StatusName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Retrieves every status row. No ordering is applied.
pub async fn list_order_statuses(db: &DatabaseConnection) -> Result<Vec<order_status::Model>> {
    OrderStatus::find().all(db).await.map_err(Into::into)
}

/// Finds a status by its id, returning None if it does not exist.
pub async fn get_order_status_by_id<C>(db: &C, status_id: Uuid) -> Result<Option<order_status::Model>>
where
    C: ConnectionTrait,
{
    OrderStatus::find_by_id(status_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds the status currently referenced by an order.
///
/// Returns None when the order does not exist or has no status reference.
pub async fn get_order_status_for_order(
    db: &DatabaseConnection,
    order_id: Uuid,
) -> Result<Option<order_status::Model>> {
    let Some(order) = Order::find_by_id(order_id).one(db).await? else {
        return Ok(None);
    };

    if order.order_status_id.is_none() {
        return Ok(None);
    }

    order
        .find_related(OrderStatus)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Looks up the single status row carrying `name`.
///
/// # Errors
/// Returns [`Error::Configuration`] when no row, or more than one row, carries the name.
#[instrument(skip(db))]
pub async fn resolve_order_status_by_name<C>(db: &C, name: StatusName) -> Result<order_status::Model>
where
    C: ConnectionTrait,
{
    let mut statuses = OrderStatus::find()
        .filter(order_status::Column::Name.eq(name.as_str()))
        .all(db)
        .await?;

    match (statuses.pop(), statuses.is_empty()) {
        (Some(status), true) => Ok(status),
        (found, _) => {
            warn!(
                status = %name,
                rows = statuses.len() + usize::from(found.is_some()),
                "expected exactly one status row"
            );
            Err(Error::wrong_configuration())
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_resolve_order_status_by_name_integration() -> Result<()> {
        let db = setup_test_db().await?;

        let received = resolve_order_status_by_name(&db, StatusName::Received).await?;
        assert_eq!(received.name, "RECEIVED");

        // Same store, same answer
        let again = resolve_order_status_by_name(&db, StatusName::Received).await?;
        assert_eq!(received.id, again.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_resolve_order_status_missing_row() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([Vec::<order_status::Model>::new()])
            .into_connection();

        let result = resolve_order_status_by_name(&db, StatusName::Processing).await;
        assert!(matches!(result, Err(Error::Configuration { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_resolve_order_status_duplicated_row() -> Result<()> {
        let db = setup_test_db().await?;
        insert_status(&db, "COMPLETED").await?;

        let result = resolve_order_status_by_name(&db, StatusName::Completed).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Configuration { message } if message == crate::errors::WRONG_CONFIGURATION_MESSAGE
        ));

        // Other names are unaffected
        resolve_order_status_by_name(&db, StatusName::Received).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_list_and_get_order_statuses_integration() -> Result<()> {
        let db = setup_test_db().await?;

        let statuses = list_order_statuses(&db).await?;
        assert_eq!(statuses.len(), StatusName::ALL.len());

        let cancelled = statuses.iter().find(|s| s.name == "CANCELLED").unwrap();
        let found = get_order_status_by_id(&db, cancelled.id).await?;
        assert_eq!(found.as_ref(), Some(cancelled));

        let missing = get_order_status_by_id(&db, Uuid::new_v4()).await?;
        assert!(missing.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_get_order_status_for_order_integration() -> Result<()> {
        let db = setup_test_db().await?;
        let order = create_test_order(&db, &["Margherita"]).await?;

        let status = get_order_status_for_order(&db, order.id).await?;
        assert_eq!(status.unwrap().name, "RECEIVED");

        // Unknown order
        let unknown = get_order_status_for_order(&db, Uuid::new_v4()).await?;
        assert!(unknown.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_get_order_status_for_order_without_status() -> Result<()> {
        let db = setup_test_db().await?;
        let orphan = insert_order_at(&db, &["Diavola"], None, 0).await?;

        let status = get_order_status_for_order(&db, orphan.id).await?;
        assert!(status.is_none());

        Ok(())
    }

    #[test]
    fn test_status_names() {
        let names: Vec<_> = StatusName::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(names, ["RECEIVED", "PROCESSING", "COMPLETED", "CANCELLED"]);
    }
}
