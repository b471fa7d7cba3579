use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gridboard_api::config::ServerConfig;
use gridboard_api::state::AppState;
use gridboard_api::{registry, router};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gridboard_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = gridboard_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    gridboard_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    gridboard_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Widget definition registry ---
    let registry = registry::load_registry(&config.widgets_file)
        .expect("Failed to load widget definitions");
    tracing::info!(
        definitions = registry.len(),
        file = %config.widgets_file,
        "Widget definition registry loaded",
    );

    // --- Application state and router ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        registry: Arc::new(registry),
    };
    let app = router::build_app_router(state, &config);

    // --- Serve ---
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Invalid bind address");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    tracing::info!(%addr, "Server listening");

    axum::serve(listener, app).await.expect("Server error");
}
