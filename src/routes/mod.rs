// Route exports
pub mod referrals;

use actix_web::web;

pub use referrals::{AppState, Engines};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(referrals::configure),
    );
}
