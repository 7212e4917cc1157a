//! Smart link JSON API

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::helpers::{error_from, json_config, success};
use crate::services::{CreateLinkRequest, LinkService};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkResponse {
    pub success: bool,
    pub link_id: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackClickRequest {
    #[serde(default)]
    pub link_id: String,
    #[serde(default)]
    pub platform: String,
}

pub struct LinkApi;

impl LinkApi {
    /// Public URL of a link: configured base, else the request's own origin.
    fn public_url(req: &HttpRequest, service: &LinkService, id: &str) -> String {
        match service.config().public_base_url.as_deref() {
            Some(base) if !base.trim().is_empty() => {
                format!("{}/l/{}", base.trim().trim_end_matches('/'), id)
            }
            _ => {
                let info = req.connection_info();
                format!("{}://{}/l/{}", info.scheme(), info.host(), id)
            }
        }
    }

    pub async fn create_link(
        req: HttpRequest,
        body: web::Json<CreateLinkRequest>,
        service: web::Data<Arc<LinkService>>,
    ) -> impl Responder {
        match service.create_link(body.into_inner()).await {
            Ok(link) => {
                let url = Self::public_url(&req, &service, &link.id);
                HttpResponse::Ok().json(CreateLinkResponse {
                    success: true,
                    link_id: link.id,
                    url,
                })
            }
            Err(e) => {
                debug!("Create link rejected: {}", e);
                error_from(&e)
            }
        }
    }

    pub async fn list_links(service: web::Data<Arc<LinkService>>) -> impl Responder {
        match service.links_document().await {
            Ok(links) => HttpResponse::Ok().json(links),
            Err(e) => error_from(&e),
        }
    }

    pub async fn track_click(
        body: web::Json<TrackClickRequest>,
        service: web::Data<Arc<LinkService>>,
    ) -> impl Responder {
        let body = body.into_inner();
        match service
            .track_platform_click(&body.link_id, &body.platform)
            .await
        {
            Ok(outcome) => {
                trace!(
                    "Platform click {:?} for {}/{}",
                    outcome, body.link_id, body.platform
                );
                success()
            }
            Err(e) => error_from(&e),
        }
    }

    pub async fn delete_link(
        path: web::Path<String>,
        service: web::Data<Arc<LinkService>>,
    ) -> impl Responder {
        match service.delete_link(&path.into_inner()).await {
            Ok(_) => success(),
            Err(e) => error_from(&e),
        }
    }
}

pub fn link_api_routes() -> actix_web::Scope {
    web::scope("/api")
        .app_data(json_config())
        .route("/create-link", web::post().to(LinkApi::create_link))
        .route("/links", web::get().to(LinkApi::list_links))
        .route("/links/{link_id}", web::delete().to(LinkApi::delete_link))
        .route("/track-click", web::post().to(LinkApi::track_click))
}
