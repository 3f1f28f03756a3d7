//! Entity module - Contains the SeaORM entity definitions for the database.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod order;
pub mod order_status;

// Re-export specific types to avoid conflicts
pub use order::{Column as OrderColumn, Entity as Order, Model as OrderModel, Pizzas};
pub use order_status::{
    Column as OrderStatusColumn, Entity as OrderStatus, Model as OrderStatusModel,
};
