use dotenvy::dotenv;
use pizzeria::{
    api,
    config::{self, database},
    errors::Result,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (non-fatal, env vars can be set externally)
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the application settings
    let app_config = config::load_app_config()
        .inspect_err(|e| error!("Failed to load application settings: {}", e))?;
    info!("Successfully processed application configuration.");

    // 4. Connect and make sure the tables exist
    let db = database::create_connection(&app_config.database.url)
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|()| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Seed the order statuses the workflow depends on
    database::seed_order_statuses(&db, &app_config.seed.statuses)
        .await
        .inspect_err(|e| error!("Failed to seed order statuses: {}", e))?;

    // 6. Serve the API until shutdown
    api::start_server(&app_config.server, db).await
}
