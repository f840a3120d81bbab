use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/admin/recurring-slots/maintain",
            post(handlers::maintenance::run_maintenance),
        )
        .route(
            "/api/admin/recurring-slots/stats",
            get(handlers::maintenance::get_stats),
        )
}
