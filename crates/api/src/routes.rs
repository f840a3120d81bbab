/// Liveness and version endpoints
pub mod health;
/// Window maintenance trigger and statistics
pub mod maintenance;
/// On-demand template materialization
pub mod templates;
