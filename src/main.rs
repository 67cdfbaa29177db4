use axum::{routing::get, Router};
use mimalloc::MiMalloc;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use seat_rules::{
    cache::CachedAggregator, config::Config, controllers, database::Database,
    redis_client::RedisClient, AppState, SeatRulesValidator,
};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    // В проде пишем JSON для сборщика логов, локально - читаемый текст
    let json_logs = config.app.json_logs();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.app.rust_log))
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json_logs).then(|| tracing_subscriber::fmt::layer()))
        .init();

    info!(environment = %config.app.environment, "Starting seat rules validation service");

    // Connect to the database
    let db = Database::connect(&config.database).await?;
    info!("Database connected");

    // Run migrations
    db.run_migrations().await?;

    // Connect to Redis
    let redis = RedisClient::connect(&config.redis).await?;
    info!("Redis connected");

    // Loaders: rows straight from Postgres, plan totals through the Redis cache
    let store = db.seat_store();
    let aggregates = CachedAggregator::new(store.clone(), redis, config.rules.aggregate_cache_ttl_secs);
    let validator = SeatRulesValidator::new(Arc::new(store), Arc::new(aggregates))
        .with_scan_strategy(config.rules.scan_strategy);
    info!(scan_strategy = ?config.rules.scan_strategy, "Seat rules validator ready");

    let app_state = Arc::new(AppState::new(validator));

    let app = Router::new()
        .route("/", get(|| async { "Seat Rules API v1.0" }))
        .route("/health", get(|| async { "OK" }))
        .nest("/api", controllers::routes())
        .with_state(app_state)
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.app.host, config.app.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
