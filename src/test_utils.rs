//! Shared test utilities for the pizzeria backend.
//!
//! This module provides helpers for setting up seeded in-memory databases and
//! creating orders and statuses with controlled timestamps.

use crate::{
    config::database,
    core::{
        order,
        order_status::{StatusName, resolve_order_status_by_name},
    },
    entities::{self, OrderStatus, Pizzas},
    errors::Result,
};
use chrono::{DateTime, TimeDelta, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

/// Creation time of the oldest fixture order (2024-02-15 01:39:42 UTC).
const FIXTURE_EPOCH_SECS: i64 = 1_707_961_182;

/// Creates an in-memory `SQLite` database with all tables initialized and the
/// four canonical statuses seeded.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    database::create_tables(&db).await?;
    database::seed_order_statuses(&db, &database::default_status_names()).await?;
    Ok(db)
}

/// Creates an order through the core, so it starts out RECEIVED.
pub async fn create_test_order(
    db: &DatabaseConnection,
    pizzas: &[&str],
) -> Result<entities::order::Model> {
    order::create_order(db, pizzas.iter().map(ToString::to_string).collect()).await
}

/// Inserts an order directly, bypassing validation.
///
/// `created_at` is fixed to the fixture epoch plus `offset_secs`, which lets tests
/// control which order counts as oldest. `status_id` may be None to model rows
/// written outside the core.
pub async fn insert_order_at(
    db: &DatabaseConnection,
    pizzas: &[&str],
    status_id: Option<Uuid>,
    offset_secs: i64,
) -> Result<entities::order::Model> {
    let created_at = DateTime::<Utc>::UNIX_EPOCH + TimeDelta::seconds(FIXTURE_EPOCH_SECS + offset_secs);

    let model = entities::order::ActiveModel {
        id: Set(Uuid::new_v4()),
        pizzas: Set(Pizzas(pizzas.iter().map(ToString::to_string).collect())),
        order_status_id: Set(status_id),
        created_at: Set(created_at),
        ..Default::default()
    };

    model.insert(db).await.map_err(Into::into)
}

/// Inserts an extra status row, e.g. to produce a duplicated name.
pub async fn insert_status(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::order_status::Model> {
    let model = entities::order_status::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
    };

    model.insert(db).await.map_err(Into::into)
}

/// Removes every status row carrying `name`.
pub async fn delete_status(db: &DatabaseConnection, name: StatusName) -> Result<()> {
    OrderStatus::delete_many()
        .filter(entities::order_status::Column::Name.eq(name.as_str()))
        .exec(db)
        .await?;
    Ok(())
}

/// Id of the seeded status row for `name`.
pub async fn status_id(db: &DatabaseConnection, name: StatusName) -> Result<Uuid> {
    Ok(resolve_order_status_by_name(db, name).await?.id)
}
