use cipher_portal::{
    AppState, InertiaRenderer, RendererState,
    config::{AppConfig, Env},
    create_router,
    repository::{PostgresRepository, RepositoryState},
    routes::route_table,
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// Loads configuration, sets up logging, builds the route table and the user
/// repository, then serves HTTP until the process is stopped.
#[tokio::main]
async fn main() {
    // 1. Configuration (fail-fast on missing secrets)
    dotenv::dotenv().ok();
    let config = AppConfig::load();

    // 2. Logging: RUST_LOG wins, otherwise sensible local defaults.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "cipher_portal=debug,tower_http=info,axum=trace".into());

    match config.env {
        Env::Local => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            // JSON lines for log aggregation.
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Application starting in {:?} mode", config.env);
    if config.dev_bypass_enabled() {
        tracing::warn!(
            "Local mode: the `x-user-id` header can impersonate any user and the JWT secret \
             may be the built-in default. Set APP_ENV=production outside development."
        );
    }

    // 3. Route table, built once and shared read-only.
    let routes = match route_table() {
        Ok(table) => Arc::new(table),
        Err(e) => {
            tracing::error!("Invalid route table: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!("Registered {} page routes", routes.len());

    // 4. Database (user lookups during session resolution)
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.db_url)
        .await
        .expect("FATAL: Failed to connect to Postgres. Check DATABASE_URL.");
    let repo = Arc::new(PostgresRepository::new(pool)) as RepositoryState;

    // 5. Renderer
    let renderer = Arc::new(InertiaRenderer::from_config(&config)) as RendererState;

    let bind_addr = config.bind_addr.clone();
    let app_state = AppState {
        repo,
        routes,
        renderer,
        config,
    };

    // 6. Router and Server Startup
    let app = create_router(app_state);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .expect("FATAL: Failed to bind HTTP listener. Check APP_ADDR.");

    tracing::info!("Listening on {}", bind_addr);
    tracing::info!("API Documentation (Swagger UI) available at /swagger-ui");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("HTTP server stopped: {}", e);
    }
}
