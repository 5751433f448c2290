use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fundstack_backend::AppState;
use fundstack_backend::config::AppConfig;
use fundstack_backend::handlers;
use fundstack_backend::jobs::reconciliation_job::start_reconciliation_job;
use fundstack_backend::services::blockchain::VaultClient;
use fundstack_backend::services::email::HttpEmailSender;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,fundstack_backend=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Arc::new(AppConfig::from_env().expect("Invalid configuration"));

    // Connect to database
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    // Run migrations
    tracing::info!("Running migrations...");
    migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let blockchain = Arc::new(VaultClient::new(&config).expect("Failed to initialize VaultClient"));
    let email = Arc::new(HttpEmailSender::new(&config));

    let state = AppState {
        db,
        config: config.clone(),
        blockchain,
        email,
    };

    // Optional in-process scheduler (external cron is the primary trigger)
    start_reconciliation_job(state.clone()).await;

    // Build router
    let app = Router::new()
        .route("/", get(hello_fundstack))
        .route(
            "/api/cron/reconcile",
            post(handlers::reconcile::trigger_reconciliation),
        )
        .route(
            "/api/rewards/{reward_id}/claim",
            post(handlers::claim::claim_reward),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .expect("Failed to bind listener");

    tracing::info!("Server listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}

async fn hello_fundstack() -> &'static str {
    "Hello from Fundstack Backend!"
}
