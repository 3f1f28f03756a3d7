//! Order business logic - Order creation, lookups and the kitchen workflow.
//!
//! The kitchen works a single lane: at most one order is PROCESSING at a time.
//! [`advance_next_order`] finishes the current PROCESSING order (if any) and starts
//! the oldest RECEIVED one. Status rows are resolved by name on every call through
//! [`resolve_order_status_by_name`].

use crate::{
    core::order_status::{StatusName, get_order_status_by_id, resolve_order_status_by_name},
    entities::{Order, Pizzas, order, order_status},
    errors::{Error, Result},
};
use sea_orm::{IntoActiveModel, QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{debug, info, instrument};

/// Retrieves every order. No ordering is applied.
pub async fn list_orders(db: &DatabaseConnection) -> Result<Vec<order::Model>> {
    Order::find().all(db).await.map_err(Into::into)
}

/// Finds an order by its id, returning None if it does not exist.
pub async fn get_order_by_id<C>(db: &C, order_id: Uuid) -> Result<Option<order::Model>>
where
    C: ConnectionTrait,
{
    Order::find_by_id(order_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all orders currently in `status`, oldest first.
///
/// Orders created in the same instant fall back to id order so the result is stable.
pub async fn get_orders_with_status<C>(
    db: &C,
    status: &order_status::Model,
) -> Result<Vec<order::Model>>
where
    C: ConnectionTrait,
{
    Order::find()
        .filter(order::Column::OrderStatusId.eq(status.id))
        .order_by_asc(order::Column::CreatedAt)
        .order_by_asc(order::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Returns the oldest RECEIVED order without changing anything.
///
/// # Errors
/// Returns [`Error::Configuration`] if the RECEIVED status row is missing or duplicated.
#[instrument(skip(db))]
pub async fn get_next_order(db: &DatabaseConnection) -> Result<Option<order::Model>> {
    let received = resolve_order_status_by_name(db, StatusName::Received).await?;
    let orders = get_orders_with_status(db, &received).await?;

    Ok(orders.into_iter().next())
}

/// Completes the current PROCESSING order and moves the oldest RECEIVED order to PROCESSING.
///
/// All three statuses are resolved before anything is written. When no order is
/// RECEIVED nothing changes and None is returned, even if an order is PROCESSING.
/// Reads and writes share one database transaction so both status changes commit
/// together; selection of the RECEIVED order is only as exclusive as the backend's
/// isolation level makes it.
///
/// # Errors
/// Returns [`Error::Configuration`] if any of the RECEIVED, PROCESSING or COMPLETED
/// status rows is missing or duplicated.
#[instrument(skip(db))]
pub async fn advance_next_order(db: &DatabaseConnection) -> Result<Option<order::Model>> {
    let txn = db.begin().await?;

    let received = resolve_order_status_by_name(&txn, StatusName::Received).await?;
    let processing = resolve_order_status_by_name(&txn, StatusName::Processing).await?;
    let completed = resolve_order_status_by_name(&txn, StatusName::Completed).await?;

    let received_orders = get_orders_with_status(&txn, &received).await?;
    let processing_orders = get_orders_with_status(&txn, &processing).await?;

    let Some(received_order) = received_orders.into_iter().next() else {
        debug!("No received order to advance");
        return Ok(None);
    };

    if let Some(processing_order) = processing_orders.into_iter().next() {
        let finished = assign_status(&txn, processing_order, &completed).await?;
        info!(order_id = %finished.id, "Order completed");
    }

    let started = assign_status(&txn, received_order, &processing).await?;
    txn.commit().await?;

    info!(order_id = %started.id, "Order moved to processing");
    Ok(Some(started))
}

/// Creates a new order in the RECEIVED status.
///
/// The pizza list is validated before the store is touched.
///
/// # Errors
/// Returns [`Error::Validation`] if `pizzas` is empty and [`Error::Configuration`] if
/// the RECEIVED status row is missing or duplicated.
#[instrument(skip(db))]
pub async fn create_order(db: &DatabaseConnection, pizzas: Vec<String>) -> Result<order::Model> {
    if pizzas.is_empty() {
        return Err(Error::Validation {
            message: "Input pizza list cannot be empty.".to_string(),
        });
    }

    let received = resolve_order_status_by_name(db, StatusName::Received).await?;

    let order = order::ActiveModel {
        id: Set(Uuid::new_v4()),
        pizzas: Set(Pizzas(pizzas)),
        order_status_id: Set(Some(received.id)),
        ..Default::default()
    };

    let result = order.insert(db).await?;
    info!(order_id = %result.id, "Order created");
    Ok(result)
}

/// Points an order at a different status.
///
/// An unknown `order_id` is silently ignored: nothing is written and no error is
/// returned.
///
/// # Errors
/// Returns [`Error::Configuration`] if the order exists but `status_id` matches no
/// status row.
#[instrument(skip(db))]
pub async fn set_order_status(db: &DatabaseConnection, order_id: Uuid, status_id: Uuid) -> Result<()> {
    let Some(order) = get_order_by_id(db, order_id).await? else {
        debug!("Order does not exist, leaving statuses untouched");
        return Ok(());
    };

    let status = get_order_status_by_id(db, status_id)
        .await?
        .ok_or_else(Error::wrong_configuration)?;

    assign_status(db, order, &status).await?;
    Ok(())
}

/// Writes a new status reference for `order`. `modified_at` is refreshed on save.
async fn assign_status<C>(
    db: &C,
    order: order::Model,
    status: &order_status::Model,
) -> Result<order::Model>
where
    C: ConnectionTrait,
{
    let mut active = order.into_active_model();
    active.order_status_id = Set(Some(status.id));
    active.update(db).await.map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_order_validation() -> Result<()> {
        // No query results are queued: any database access would fail the call
        // with a database error instead of a validation error.
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = create_order(&db, Vec::new()).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_order_integration() -> Result<()> {
        let db = setup_test_db().await?;
        let pizzas = vec![
            "Quattro stagioni".to_string(),
            "Affumicata".to_string(),
            "Deliziosa".to_string(),
        ];

        let created = create_order(&db, pizzas.clone()).await?;

        let fetched = get_order_by_id(&db, created.id).await?.unwrap();
        assert_eq!(fetched.pizzas, Pizzas(pizzas));
        assert_eq!(
            fetched.order_status_id,
            Some(status_id(&db, StatusName::Received).await?)
        );
        assert!(fetched.created_at <= fetched.modified_at);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_order_with_duplicated_received_status() -> Result<()> {
        let db = setup_test_db().await?;
        insert_status(&db, "RECEIVED").await?;

        let result = create_order(&db, vec!["Margherita".to_string()]).await;
        assert!(matches!(result.unwrap_err(), Error::Configuration { .. }));
        assert!(list_orders(&db).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_list_and_get_orders_integration() -> Result<()> {
        let db = setup_test_db().await?;
        let first = create_test_order(&db, &["Margherita"]).await?;
        let second = create_test_order(&db, &["Diavola", "Tirolese"]).await?;

        let orders = list_orders(&db).await?;
        assert_eq!(orders.len(), 2);
        assert!(orders.contains(&first));
        assert!(orders.contains(&second));

        assert!(get_order_by_id(&db, Uuid::new_v4()).await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_get_next_order_returns_oldest_received() -> Result<()> {
        let db = setup_test_db().await?;
        let received = status_id(&db, StatusName::Received).await?;
        let processing = status_id(&db, StatusName::Processing).await?;

        insert_order_at(&db, &["Capricciosa"], Some(processing), 0).await?;
        let newer = insert_order_at(&db, &["Margherita"], Some(received), 20).await?;
        let oldest = insert_order_at(&db, &["Diavola"], Some(received), 10).await?;

        let next = get_next_order(&db).await?.unwrap();
        assert_eq!(next.id, oldest.id);
        assert_ne!(next.id, newer.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_next_order_empty() -> Result<()> {
        let db = setup_test_db().await?;

        assert!(get_next_order(&db).await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_next_order_with_duplicated_received_status() -> Result<()> {
        let db = setup_test_db().await?;
        let order = create_test_order(&db, &["Margherita"]).await?;
        insert_status(&db, "RECEIVED").await?;

        assert!(matches!(
            get_next_order(&db).await.unwrap_err(),
            Error::Configuration { .. }
        ));
        assert!(matches!(
            advance_next_order(&db).await.unwrap_err(),
            Error::Configuration { .. }
        ));

        // Nothing was written
        let unchanged = get_order_by_id(&db, order.id).await?.unwrap();
        assert_eq!(unchanged, order);

        Ok(())
    }

    #[tokio::test]
    async fn test_advance_with_missing_completed_status() -> Result<()> {
        let db = setup_test_db().await?;
        let order = create_test_order(&db, &["Margherita"]).await?;
        delete_status(&db, StatusName::Completed).await?;

        assert!(matches!(
            advance_next_order(&db).await.unwrap_err(),
            Error::Configuration { .. }
        ));
        assert_eq!(get_order_by_id(&db, order.id).await?.unwrap(), order);

        Ok(())
    }

    #[tokio::test]
    async fn test_advance_next_order_without_processing() -> Result<()> {
        let db = setup_test_db().await?;
        let received = status_id(&db, StatusName::Received).await?;
        let processing = status_id(&db, StatusName::Processing).await?;

        let first = insert_order_at(&db, &["Margherita"], Some(received), 0).await?;
        let second = insert_order_at(&db, &["Diavola"], Some(received), 10).await?;

        let advanced = advance_next_order(&db).await?.unwrap();
        assert_eq!(advanced.id, first.id);
        assert_eq!(advanced.order_status_id, Some(processing));
        assert_eq!(advanced.pizzas, first.pizzas);

        // The younger order is untouched
        assert_eq!(get_order_by_id(&db, second.id).await?.unwrap(), second);

        Ok(())
    }

    #[tokio::test]
    async fn test_advance_next_order_completes_processing() -> Result<()> {
        let db = setup_test_db().await?;
        let received = status_id(&db, StatusName::Received).await?;
        let processing = status_id(&db, StatusName::Processing).await?;
        let completed = status_id(&db, StatusName::Completed).await?;

        let in_oven = insert_order_at(&db, &["Diavola"], Some(processing), 0).await?;
        let waiting = insert_order_at(&db, &["Margherita"], Some(received), 10).await?;

        let advanced = advance_next_order(&db).await?.unwrap();
        assert_eq!(advanced.id, waiting.id);
        assert_eq!(advanced.order_status_id, Some(processing));

        let finished = get_order_by_id(&db, in_oven.id).await?.unwrap();
        assert_eq!(finished.order_status_id, Some(completed));
        assert!(finished.modified_at >= in_oven.modified_at);

        Ok(())
    }

    #[tokio::test]
    async fn test_advance_next_order_without_received() -> Result<()> {
        let db = setup_test_db().await?;
        let processing = status_id(&db, StatusName::Processing).await?;
        let in_oven = insert_order_at(&db, &["Diavola"], Some(processing), 0).await?;

        assert!(advance_next_order(&db).await?.is_none());

        // The processing order keeps its status
        assert_eq!(get_order_by_id(&db, in_oven.id).await?.unwrap(), in_oven);

        Ok(())
    }

    #[tokio::test]
    async fn test_advance_drains_queue_in_creation_order() -> Result<()> {
        let db = setup_test_db().await?;
        let received = status_id(&db, StatusName::Received).await?;
        let completed = status_id(&db, StatusName::Completed).await?;

        let a = insert_order_at(&db, &["A"], Some(received), 0).await?;
        let b = insert_order_at(&db, &["B"], Some(received), 10).await?;

        assert_eq!(advance_next_order(&db).await?.unwrap().id, a.id);
        assert_eq!(advance_next_order(&db).await?.unwrap().id, b.id);
        assert!(advance_next_order(&db).await?.is_none());

        let a = get_order_by_id(&db, a.id).await?.unwrap();
        assert_eq!(a.order_status_id, Some(completed));

        Ok(())
    }

    #[tokio::test]
    async fn test_set_order_status_integration() -> Result<()> {
        let db = setup_test_db().await?;
        let cancelled = status_id(&db, StatusName::Cancelled).await?;
        let order = create_test_order(&db, &["Margherita"]).await?;

        set_order_status(&db, order.id, cancelled).await?;

        let updated = get_order_by_id(&db, order.id).await?.unwrap();
        assert_eq!(updated.order_status_id, Some(cancelled));

        Ok(())
    }

    #[tokio::test]
    async fn test_set_order_status_unknown_status() -> Result<()> {
        let db = setup_test_db().await?;
        let order = create_test_order(&db, &["Margherita"]).await?;

        let result = set_order_status(&db, order.id, Uuid::new_v4()).await;
        assert!(matches!(result.unwrap_err(), Error::Configuration { .. }));
        assert_eq!(get_order_by_id(&db, order.id).await?.unwrap(), order);

        Ok(())
    }

    #[tokio::test]
    async fn test_set_order_status_unknown_order_is_noop() -> Result<()> {
        let db = setup_test_db().await?;
        let order = create_test_order(&db, &["Margherita"]).await?;

        // Neither the order nor the status exist: still not an error
        set_order_status(&db, Uuid::new_v4(), Uuid::new_v4()).await?;

        let cancelled = status_id(&db, StatusName::Cancelled).await?;
        set_order_status(&db, Uuid::new_v4(), cancelled).await?;

        assert_eq!(list_orders(&db).await?, vec![order]);

        Ok(())
    }
}
