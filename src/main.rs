use std::sync::Arc;

use anyhow::Context;
use appointment_api::api::routes::create_routes;
use appointment_api::auth::{AuthService, JwtService, PasswordHasher};
use appointment_api::config::{run_migrations, AppConfig, DatabaseConfig};
use appointment_api::services::AppointmentService;
use appointment_api::store::PgStore;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    let db_config = DatabaseConfig::from_env()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .context("LOG_LEVEL is not a valid tracing filter")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if config.is_production() && config.uses_default_secret() {
        warn!("JWT_SECRET is not set; tokens are signed with the development secret");
    }

    let pool = db_config.create_pool().await?;
    run_migrations(&pool).await?;
    info!("database ready");

    let store = Arc::new(PgStore::new(pool));
    let jwt_service = JwtService::new(
        &config.jwt_secret,
        chrono::Duration::from_std(config.jwt_expires_in)
            .context("JWT_EXPIRES_IN is out of range")?,
    );
    info!(
        expires_in_seconds = jwt_service.expires_in_seconds(),
        "session tokens configured"
    );
    let auth_service = AuthService::new(
        store.clone(),
        jwt_service,
        PasswordHasher::new(config.bcrypt_cost),
    );
    let appointment_service = AppointmentService::new(store);

    let app = create_routes(auth_service, appointment_service, config.is_development());

    let address = config.server_address();
    let listener = TcpListener::bind(&address).await?;
    info!("Appointment API listening on http://{}/graphql", address);
    info!("Health check available at http://{}/health", address);

    axum::serve(listener, app).await?;

    Ok(())
}
