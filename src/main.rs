//! Alexandria backend - entry point
//!
//! Loads configuration, opens the database, wires the event bus and GraphQL
//! schema, and serves the API.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use alexandria::config::Config;
use alexandria::db::Database;
use alexandria::graphql::build_schema;
use alexandria::services::{AuthConfig, AuthService, EventBus};
use alexandria::{AppState, build_app};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Arc::new(Config::from_env()?);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "alexandria=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    tracing::info!("Starting Alexandria Backend");

    if let Some(dir) = std::path::Path::new(&config.database_path).parent() {
        std::fs::create_dir_all(dir).ok();
    }
    let db = Database::connect(&config.database_path).await?;
    db.init_schema().await?;
    tracing::info!("Database connected");

    // Event bus is created once here and injected into the schema; mutations
    // publish on it and subscription connections listen on it.
    let events = Arc::new(EventBus::default());

    let auth = AuthService::new(db.clone(), AuthConfig::from(&*config));

    let schema = build_schema(db.clone(), auth.clone(), events);
    tracing::info!("GraphQL schema built");

    let state = AppState {
        config: config.clone(),
        db,
        auth,
        schema,
    };

    let app = build_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);
    tracing::info!(
        "GraphQL playground: http://localhost:{}/graphql",
        config.port
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
