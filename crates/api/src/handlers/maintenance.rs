use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use recurslot_scheduler::{MaintenanceReport, RecurringSlotStats};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::{middleware::error_handling::AppError, ApiState};

#[derive(Debug, Serialize, Deserialize)]
pub struct MaintenanceResponse {
    pub success: bool,
    #[serde(flatten)]
    pub report: MaintenanceReport,
    pub net_change: i64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: RecurringSlotStats,
    pub horizon_days: u32,
    pub current_time: DateTime<Utc>,
}

/// Runs one maintenance pass on demand. Per-template failures are part of
/// the 200 response; only fatal failures and timeouts map to errors.
#[axum::debug_handler]
pub async fn run_maintenance(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<MaintenanceResponse>, AppError> {
    let now = Utc::now();
    info!("Manual recurring slot maintenance triggered");

    let report = state.maintainer.run_with_timeout(now).await?;

    Ok(Json(MaintenanceResponse {
        success: report.is_complete(),
        net_change: report.net_change(),
        report,
        timestamp: Utc::now(),
    }))
}

#[axum::debug_handler]
pub async fn get_stats(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<StatsResponse>, AppError> {
    let now = Utc::now();
    let stats = state.maintainer.stats(now).await?;

    Ok(Json(StatsResponse {
        stats,
        horizon_days: state.maintainer.config().horizon_days,
        current_time: now,
    }))
}
