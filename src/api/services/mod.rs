pub mod health;
pub mod helpers;
pub mod landing;
pub mod links;

pub use health::{AppStartTime, HealthService, health_routes};
pub use landing::{LandingService, landing_routes};
pub use links::{LinkApi, link_api_routes};

/// Register every smart link route on an app.
///
/// Expects `web::Data<Arc<LinkService>>` and `web::Data<AppStartTime>` in app data.
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(health_routes())
        .service(link_api_routes())
        .service(landing_routes());
}
