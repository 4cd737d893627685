use axum::{
    routing::{delete, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/bookings",
            post(handlers::booking::create_booking).get(handlers::booking::list_user_bookings),
        )
        .route(
            "/api/bookings/:id/confirm",
            post(handlers::booking::confirm_booking),
        )
        .route("/api/bookings/:id", delete(handlers::booking::cancel_booking))
}
