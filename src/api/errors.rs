use actix_web::error::JsonPayloadError;
use actix_web::{Error, HttpRequest, HttpResponse};
use serde_json::json;

pub(crate) fn default_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    error!("Error in request: {} \n Error: {}", req.full_url(), err);
    let body = json!({ "status": "error", "error": err.to_string() });
    actix_web::error::InternalError::from_response(err, HttpResponse::BadRequest().json(body))
        .into()
}
