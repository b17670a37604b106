//! Bookings API Server
//!
//! Room availability search and reservations for a small bed & breakfast.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use sea_orm::Database;
use serde::Serialize;
use tokio::signal;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod cookies;
mod domain;
mod entity;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{
    run_session_sweeper, FileTemplateStore, InMemorySessionStore, PostgresReservationRepository,
    PostgresRoomRepository, PostgresRoomRestrictionRepository, SmtpMailTransport,
};
use app::{
    notification_channel, AvailabilityService, ConfirmationMail, NotificationWorker,
    ReservationService, ReservationSessionStore,
};
use config::Config;
use cookies::{SessionCookie, SessionState};

/// How often expired sessions are purged
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// How long shutdown waits for queued mail to go out
const MAIL_DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

pub type Availability = AvailabilityService<PostgresRoomRepository, PostgresRoomRestrictionRepository>;

pub type Reservations = ReservationService<
    PostgresRoomRepository,
    PostgresReservationRepository,
    PostgresRoomRestrictionRepository,
    InMemorySessionStore,
>;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub availability_service: Arc<Availability>,
    pub reservation_service: Arc<Reservations>,
    pub sessions: SessionState,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,bookings_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Bookings API...");

    // Load configuration
    let config = Config::from_env()?;

    // Connect to PostgreSQL
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Create adapters
    let room_repo = Arc::new(PostgresRoomRepository::new(db.clone()));
    let reservation_repo = Arc::new(PostgresReservationRepository::new(db.clone()));
    let restriction_repo = Arc::new(PostgresRoomRestrictionRepository::new(db.clone()));
    let session_store = Arc::new(InMemorySessionStore::new(config.session_lifetime));

    // Notification pipeline: one worker owns the mail transport
    let (notification_queue, notification_receiver) = notification_channel();
    let worker = NotificationWorker::new(
        Arc::new(SmtpMailTransport::new(&config.smtp)),
        Arc::new(FileTemplateStore::new(&config.template_dir)),
    );
    let worker_handle = tokio::spawn(worker.run(notification_receiver));

    let sweeper_handle = tokio::spawn(run_session_sweeper(
        session_store.clone(),
        SESSION_SWEEP_INTERVAL,
    ));

    // Create application services
    let availability_service = Arc::new(AvailabilityService::new(
        room_repo.clone(),
        restriction_repo.clone(),
    ));

    let reservation_service = Arc::new(ReservationService::new(
        availability_service.clone(),
        reservation_repo.clone(),
        restriction_repo.clone(),
        Arc::new(ReservationSessionStore::new(session_store.clone())),
        notification_queue,
        ConfirmationMail {
            from: config.mail_from.clone(),
            template: config.confirmation_template.clone(),
        },
    ));

    // Create app state
    let state = AppState {
        availability_service,
        reservation_service,
        sessions: SessionState {
            store: session_store,
            cookie: SessionCookie {
                max_age: config.session_lifetime,
                secure: config.in_production,
            },
        },
    };

    // Rate limiting config: 2 req/sec sustained, burst of 5
    // Uses PeerIpKeyExtractor to get client IP from socket connection
    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_second(2)
            .burst_size(5)
            .finish()
            .context("Failed to build governor config")?,
    );

    // Rate-limited routes (room selection, confirmation)
    let rate_limited_routes = Router::new()
        .route("/choose-room/:id", get(handlers::choose_room))
        .route("/book-room", get(handlers::book_room))
        .route(
            "/make-reservation",
            get(handlers::get_reservation)
                .post(handlers::post_reservation)
                .delete(handlers::abandon_reservation),
        )
        .layer(GovernorLayer {
            config: governor_config,
        });

    // Routes that read or write the visitor's session
    let session_routes = Router::new()
        .route("/search-availability", post(handlers::search_availability))
        .route("/reservation-summary", get(handlers::reservation_summary))
        .merge(rate_limited_routes)
        .layer(middleware::from_fn_with_state(
            state.sessions.clone(),
            cookies::session_middleware,
        ));

    // Build router
    let app = Router::new()
        .route("/health", get(health))
        .route("/rooms", get(handlers::list_rooms))
        .route(
            "/search-availability-json",
            post(handlers::search_availability_json),
        )
        .merge(session_routes)
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

    // The router owned the last queue handle, so the worker now drains and exits
    sweeper_handle.abort();
    match tokio::time::timeout(MAIL_DRAIN_TIMEOUT, worker_handle).await {
        Ok(Ok(())) => tracing::info!("Notification queue drained"),
        Ok(Err(e)) => tracing::error!(error = %e, "Notification worker panicked"),
        Err(_) => tracing::warn!("Gave up waiting for queued mail"),
    }

    Ok(())
}
