use axum::{routing::post, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new().route(
        "/api/recurring-templates/materialize",
        post(handlers::templates::materialize_template),
    )
}
