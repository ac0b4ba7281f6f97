//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Query parameters of `GET /api/taps/analytics`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TapsAnalyticsQuery {
    pub token: String,
    pub interval: String,
    pub start_date: String,
    pub end_date: String,
}

/// One aggregated bucket.
///
/// `count` is decimal text so 64-bit counts survive JSON consumers that
/// parse numbers as doubles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimePeriodCount {
    pub time_period: String,
    pub count: String,
}

/// Health check payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
    pub storage: String,
    pub rate_limited_keys: usize,
}
