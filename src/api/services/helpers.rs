//! Response helpers shared by the JSON routes

use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use serde::Serialize;
use tracing::error;

use crate::errors::SmartlinkError;

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

#[derive(Serialize)]
pub struct SuccessBody {
    pub success: bool,
}

/// `{ "error": message }` with the given status.
pub fn error_json(status: StatusCode, message: &str) -> HttpResponse {
    HttpResponse::build(status)
        .insert_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ErrorBody { error: message })
}

/// Map a [`SmartlinkError`] to its status; server-side faults are logged and
/// their details kept out of the response.
pub fn error_from(err: &SmartlinkError) -> HttpResponse {
    let status = err.http_status();
    if status.is_server_error() {
        error!("Request failed: {}", err);
        return error_json(status, "Storage error, please retry");
    }
    error_json(status, err.message())
}

pub fn success() -> HttpResponse {
    HttpResponse::Ok().json(SuccessBody { success: true })
}

/// JSON extractor config answering bad bodies with `{error}` instead of plain text.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err, _req| {
            let response = error_json(StatusCode::BAD_REQUEST, &format!("Invalid request body: {}", err));
            InternalError::from_response(err, response).into()
        })
}
