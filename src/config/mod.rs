/// Database connection, table creation and status seeding
pub mod database;

/// Application settings loaded from config.toml and environment variables
pub mod settings;

pub use settings::{AppConfig, load_app_config};
