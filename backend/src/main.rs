//! Main entry point for the user accounts backend.
//!
//! Loads configuration, opens the database, and serves the Axum router.

use anyhow::Result;
use backend::build_router;
use backend::config::Config;
use backend::database::Database;
use backend::utils::jwt::JwtUtils;
use backend::utils::password::PasswordHasher;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::fmt::init;

#[tokio::main]
async fn main() -> Result<()> {
    init();

    let config = Config::from_env()?;
    let db = Database::new(&config).await?;

    let jwt_utils = Arc::new(JwtUtils::new(&config));
    let hasher = PasswordHasher::new(config.bcrypt_cost);

    let app = build_router(db.pool().clone(), jwt_utils, hasher);

    let bind_address = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;

    info!("Starting server on port {}", config.server_port);
    axum::serve(listener, app).await?;

    db.close().await;
    Ok(())
}
