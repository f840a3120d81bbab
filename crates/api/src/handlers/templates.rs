use axum::{extract::State, Json};
use chrono::Utc;
use recurslot_core::models::{MaterializeTemplateRequest, MaterializeTemplateResponse};
use std::sync::Arc;

use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn materialize_template(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<MaterializeTemplateRequest>,
) -> Result<Json<MaterializeTemplateResponse>, AppError> {
    let template = payload.into_template()?;
    let outcome = state.maintainer.materialize(&template, Utc::now()).await?;

    Ok(Json(MaterializeTemplateResponse {
        slots_generated: outcome.slots_generated,
        skipped_duplicates: outcome.skipped_duplicates,
        horizon_days: state.maintainer.config().horizon_days,
    }))
}
