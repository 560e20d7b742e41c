use axum::{routing::get, Router};
use dartstats::{
    games::{GameLogStore, InMemoryGameLogStore, PostgresGameLogStore},
    shared::AppState,
    stats::{get_dashboard_stats, StatsConfig},
    user::{InMemoryUserDirectory, PostgresUserDirectory, UserDirectory},
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dartstats=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting darts stats server");

    let config = StatsConfig::from_env();
    info!(
        recent_game_limit = config.recent_game_limit,
        score_convention = %config.score_convention,
        "Loaded stats config"
    );

    // Postgres when DATABASE_URL is set, in-memory otherwise
    let (game_store, user_directory): (Arc<dyn GameLogStore>, Arc<dyn UserDirectory>) =
        match std::env::var("DATABASE_URL") {
            Ok(database_url) => {
                info!("Connecting to Postgres game and user stores");
                let pool = sqlx::PgPool::connect(&database_url)
                    .await
                    .expect("Failed to connect to database");
                (
                    Arc::new(PostgresGameLogStore::new(pool.clone())),
                    Arc::new(PostgresUserDirectory::new(pool)),
                )
            }
            Err(_) => {
                warn!("DATABASE_URL not set, using in-memory stores");
                (
                    Arc::new(InMemoryGameLogStore::new()),
                    Arc::new(InMemoryUserDirectory::new()),
                )
            }
        };

    let app_state = AppState::new(game_store, user_directory, config);

    let app = Router::new()
        .route("/", get(|| async { "Darts stats server" }))
        .route("/stats/:user_id", get(get_dashboard_stats))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .expect("Failed to bind listener");
    info!("Server running on http://{}", bind_addr);
    axum::serve(listener, app).await.expect("Server error");
}
