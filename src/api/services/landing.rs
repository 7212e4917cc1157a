use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use tracing::{error, trace};

use crate::errors::SmartlinkError;
use crate::services::{LinkService, render_landing_page};

pub struct LandingService;

impl LandingService {
    pub async fn show(
        path: web::Path<String>,
        service: web::Data<Arc<LinkService>>,
    ) -> impl Responder {
        let link_id = path.into_inner();

        let link = match service.get_link(&link_id).await {
            Ok(link) => link,
            Err(SmartlinkError::MalformedInput(_)) => {
                trace!("Malformed link id rejected: {:?}", link_id);
                return Self::text_response(StatusCode::BAD_REQUEST, "Invalid link ID format");
            }
            Err(SmartlinkError::NotFound(_)) => {
                return Self::text_response(StatusCode::NOT_FOUND, "Link not found");
            }
            Err(e) => {
                error!("Storage error while loading link {}: {}", link_id, e);
                return Self::text_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                );
            }
        };

        let html = render_landing_page(&link);

        // 计数失败不影响访客看到页面
        if let Err(e) = service.record_view(&link.id).await {
            error!("Failed to record view for {}: {}", link.id, e);
        }

        HttpResponse::Ok()
            .insert_header(("Content-Type", "text/html; charset=utf-8"))
            .insert_header(("Cache-Control", "no-store"))
            .body(html)
    }

    #[inline]
    fn text_response(status: StatusCode, body: &'static str) -> HttpResponse {
        HttpResponse::build(status)
            .insert_header(("Content-Type", "text/plain; charset=utf-8"))
            .body(body)
    }
}

pub fn landing_routes() -> actix_web::Scope {
    web::scope("/l").route("/{link_id}", web::get().to(LandingService::show))
}
