/// Maintenance trigger and status endpoints
pub mod maintenance;
/// Recurrence template endpoints
pub mod templates;
