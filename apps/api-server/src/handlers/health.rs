//! Health check endpoint.

use actix_web::{HttpResponse, web};
use taps_shared::dto::HealthResponse;

use crate::state::AppState;

/// Health check endpoint - returns server status.
///
/// GET /api/health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        storage: state.storage.to_string(),
        rate_limited_keys: state.rate_limiter.tracked_keys().await,
    };

    HttpResponse::Ok().json(response)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use actix_web::{App, test};
    use taps_core::ports::RateLimiter;
    use taps_infra::{InMemoryRateLimiter, InMemoryTapStore, RateLimitConfig};

    use super::*;
    use crate::handlers::configure_routes;

    #[actix_web::test]
    async fn test_health_reports_storage_and_tracked_keys() {
        let store = Arc::new(InMemoryTapStore::new());
        let limiter = Arc::new(InMemoryRateLimiter::new(RateLimitConfig::default()));
        limiter.check("some-token", 100).await;

        let state = AppState {
            rate_limiter: limiter,
            teams: store.clone(),
            analytics: store,
            storage: "in-memory",
            requests_per_window: 100,
            query_timeout: Duration::from_secs(10),
        };
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: HealthResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.status, "ok");
        assert_eq!(body.storage, "in-memory");
        assert_eq!(body.rate_limited_keys, 1);
    }
}
