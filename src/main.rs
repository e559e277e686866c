use axum::{
    routing::{get, post, put},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use studytrack_api::storage::memory::MemoryStore;
use studytrack_api::{config, handlers, middleware, AppState};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "studytrack_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = config::load_config_with_fallback();

    let state = AppState {
        config: config.clone(),
        store: Arc::new(MemoryStore::new()),
    };

    // Periodically drop revocation entries for tokens past their expiry
    let cleanup_store = state.store.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(3600));
        loop {
            interval.tick().await;
            if let Err(e) = cleanup_store.cleanup_expired_revocations().await {
                tracing::warn!("Failed to clean up expired token revocations: {}", e);
            }
        }
    });

    // Routes that require a valid bearer token
    let protected = Router::new()
        .route("/api/v1/auth/logout", post(handlers::auth::logout))
        .route("/api/v1/auth/session", get(handlers::auth::session))
        .route(
            "/api/v1/subjects",
            get(handlers::subjects::list_subjects).post(handlers::subjects::create_subject),
        )
        .route(
            "/api/v1/subjects/:subject_id",
            get(handlers::subjects::get_subject)
                .patch(handlers::subjects::update_subject)
                .delete(handlers::subjects::delete_subject),
        )
        .route(
            "/api/v1/subjects/:subject_id/topics",
            post(handlers::topics::add_topic),
        )
        .route(
            "/api/v1/subjects/:subject_id/topics/order",
            put(handlers::topics::reorder_topics),
        )
        .route(
            "/api/v1/subjects/:subject_id/topics/:topic_id",
            axum::routing::patch(handlers::topics::update_topic)
                .delete(handlers::topics::delete_topic),
        )
        .route(
            "/api/v1/subjects/:subject_id/topics/:topic_id/toggle",
            post(handlers::topics::toggle_topic),
        )
        .route(
            "/api/v1/sessions",
            get(handlers::sessions::list_sessions).post(handlers::sessions::record_session),
        )
        .route(
            "/api/v1/settings",
            get(handlers::settings::get_settings).patch(handlers::settings::update_settings),
        )
        .route("/api/v1/stats", get(handlers::stats::get_stats))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::auth_middleware,
        ));

    let app = Router::new()
        // Health check routes (always available)
        .route("/", get(handlers::health::health_check))
        .route("/health", get(handlers::health::health_check))
        // Public auth routes
        .route("/api/v1/auth/register", post(handlers::auth::register))
        .route("/api/v1/auth/login", post(handlers::auth::login))
        .merge(protected)
        .with_state(state)
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .expect("invalid server.host/server.port configuration");
    tracing::info!("Starting StudyTrack API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
