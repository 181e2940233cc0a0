//! Health check endpoint for container orchestration.
//!
//! A liveness probe: it only confirms the process can answer HTTP, and
//! reports how long it has been up. There are no dependencies to check.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::clock::iso_utc_now;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub timestamp: String,
    pub uptime_seconds: u64,
}

/// Health check handler.
pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy",
        timestamp: iso_utc_now(),
        uptime_seconds: state.clock.uptime_seconds(),
    })
}
