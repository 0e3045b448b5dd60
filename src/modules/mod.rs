pub mod appointments;
pub mod health;
pub mod reports;

use actix_web::web;

use crate::middleware::{ApiKeyAuth, RateLimiter};

/// Mount the `/api` scope.
///
/// The limiter is the outer layer, so rejected API keys still spend quota
/// before any argon2 verification runs.
pub fn configure_api(
    limiter: RateLimiter,
    auth: ApiKeyAuth,
) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.service(
            web::scope("/api")
                .wrap(auth)
                .wrap(limiter)
                .configure(reports::controllers::configure),
        );
    }
}
