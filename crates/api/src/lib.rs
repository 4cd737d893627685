//! # Kabinet API
//!
//! The API crate provides the web server implementation for the Kabinet
//! booking service. It defines RESTful endpoints for querying availability,
//! managing the booking lifecycle, and editing the provider's schedule.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Translate between HTTP and the engine services
//! - **Middleware**: Provide cross-cutting concerns like error handling
//! - **Config**: Handle environment and application configuration
//!
//! The API uses Axum as the web framework; all domain logic lives in
//! `kabinet-core` and storage in `kabinet-db`.

/// Configuration module for API settings
pub mod config;
/// Request handlers that bridge HTTP and the engine
pub mod handlers;
/// Middleware for error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;

use axum::Router;
use eyre::Result;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use kabinet_core::availability::AvailabilityService;
use kabinet_core::clock::{Clock, SystemClock};
use kabinet_core::reservations::ReservationService;
use kabinet_core::store::{BookingStore, RuleStore};
use kabinet_db::repositories::{PgBookingStore, PgRuleStore};

/// Shared application state that is accessible to all request handlers
///
/// This struct encapsulates the engine services and the rule store handle
/// used by the schedule endpoints. Handlers never touch storage directly.
pub struct ApiState {
    /// Read side: slot and date queries
    pub availability: AvailabilityService,
    /// Write side: booking lifecycle
    pub reservations: ReservationService,
    /// Schedule persistence, used by the admin schedule endpoints
    pub rules: Arc<dyn RuleStore>,
}

impl ApiState {
    /// Wires the engine services on top of arbitrary store implementations.
    ///
    /// Production wiring passes the Postgres stores and the system clock;
    /// tests swap in in-memory stores and a fixed clock.
    pub fn new(
        rules: Arc<dyn RuleStore>,
        bookings: Arc<dyn BookingStore>,
        clock: Arc<dyn Clock>,
        rules_cache_ttl: i64,
    ) -> Self {
        let availability = AvailabilityService::new(
            rules.clone(),
            bookings.clone(),
            clock.clone(),
            rules_cache_ttl,
        );
        let reservations = ReservationService::new(bookings, clock);
        ApiState {
            availability,
            reservations,
            rules,
        }
    }
}

/// Builds the application router with all routes attached to `state`.
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Availability endpoints
        .merge(routes::slots::routes())
        // Booking lifecycle endpoints
        .merge(routes::bookings::routes())
        // Provider-side endpoints
        .merge(routes::admin::routes())
        // Attach shared state to all routes
        .with_state(state)
}

/// Starts the API server with the provided configuration and database
/// connection
///
/// This function initializes logging, wires the engine services to the
/// Postgres stores, configures routes, and starts the HTTP server.
pub async fn start_server(config: config::ApiConfig, db_pool: PgPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Create shared state with dependencies
    let rules: Arc<dyn RuleStore> = Arc::new(PgRuleStore::new(db_pool.clone()));
    let bookings: Arc<dyn BookingStore> = Arc::new(PgBookingStore::new(db_pool));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let state = Arc::new(ApiState::new(
        rules,
        bookings,
        clock,
        config.rules_cache_ttl,
    ));

    let app = router(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let parsed = origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect::<Vec<_>>();
        let cors = tower_http::cors::CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(parsed)
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout middleware
    let app = app.layer(tower_http::timeout::TimeoutLayer::new(
        std::time::Duration::from_secs(config.request_timeout),
    ));

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
