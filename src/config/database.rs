//! Database configuration module.
//!
//! This module handles the database connection, table creation and status seeding using
//! `SeaORM`. Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust structs
//! without hand-written SQL.

use crate::core::order_status::StatusName;
use crate::entities::{Order, OrderStatus, order_status};
use crate::errors::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, Database, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, Schema, Set,
};
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Establishes a connection to the database at `database_url`.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    debug!("Connecting to database at {database_url}");
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates the `order_statuses` and `orders` tables if they do not exist yet.
///
/// Statuses are created first because `orders.order_status_id` references them.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut status_table = schema.create_table_from_entity(OrderStatus);
    let mut order_table = schema.create_table_from_entity(Order);

    status_table.if_not_exists();
    order_table.if_not_exists();

    db.execute(builder.build(&status_table)).await?;
    db.execute(builder.build(&order_table)).await?;

    Ok(())
}

/// Status names seeded when the settings do not list any.
#[must_use]
pub fn default_status_names() -> Vec<String> {
    StatusName::ALL.iter().map(ToString::to_string).collect()
}

/// Inserts one status row for every name that has none yet.
///
/// Existing rows are never touched, so running this on every startup is safe and
/// never introduces duplicates on its own.
#[instrument(skip(db))]
pub async fn seed_order_statuses(db: &DatabaseConnection, names: &[String]) -> Result<()> {
    let mut inserted = 0_usize;

    for name in names {
        let existing = OrderStatus::find()
            .filter(order_status::Column::Name.eq(name.as_str()))
            .count(db)
            .await?;

        if existing > 0 {
            debug!("Status '{name}' already present ({existing} row(s)), skipping");
            continue;
        }

        order_status::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.clone()),
        }
        .insert(db)
        .await?;
        inserted += 1;
    }

    info!("Status seeding finished: {inserted} inserted, {} configured", names.len());
    Ok(())
}
