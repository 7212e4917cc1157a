use std::sync::Arc;
use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use serde::Serialize;
use tracing::{error, trace};

use crate::services::LinkService;

// 应用启动时间结构体
#[derive(Clone, Debug)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub backend: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<usize>,
    pub uptime: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub struct HealthService;

impl HealthService {
    pub async fn health_check(
        service: web::Data<Arc<LinkService>>,
        app_start_time: web::Data<AppStartTime>,
    ) -> impl Responder {
        trace!("Received health check request");
        let store = service.store();
        let uptime = (chrono::Utc::now() - app_start_time.start_datetime).num_seconds();

        let (status, links, err) =
            match tokio::time::timeout(Duration::from_secs(5), store.count()).await {
                Ok(Ok(count)) => (StatusCode::OK, Some(count), None),
                Ok(Err(e)) => {
                    error!("Storage health check failed: {}", e);
                    (StatusCode::SERVICE_UNAVAILABLE, None, Some(e.to_string()))
                }
                Err(_) => {
                    error!("Storage health check timed out");
                    (
                        StatusCode::SERVICE_UNAVAILABLE,
                        None,
                        Some("Storage check timed out".to_string()),
                    )
                }
            };

        HttpResponse::build(status).json(HealthResponse {
            status: if status == StatusCode::OK {
                "healthy"
            } else {
                "unhealthy"
            },
            backend: store.backend_name(),
            links,
            uptime,
            error: err,
        })
    }
}

pub fn health_routes() -> actix_web::Scope {
    web::scope("/health")
        .route("", web::get().to(HealthService::health_check))
        .route("", web::head().to(HealthService::health_check))
}
