//! HTTP handlers and route configuration.

mod analytics;
mod health;

use actix_web::web;

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Undecodable query strings get the same answer as missing parameters.
    let query_config =
        web::QueryConfig::default().error_handler(|_, _| AppError::MissingParameters.into());

    cfg.service(
        web::scope("/api")
            .app_data(query_config)
            .route("/health", web::get().to(health::health_check))
            .route("/taps/analytics", web::get().to(analytics::taps_analytics)),
    );
}
