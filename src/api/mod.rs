pub mod admin;
mod errors;
pub mod users;

use crate::AppState;
use actix_web::{get, web, HttpResponse, Responder};
pub(crate) use errors::default_error_handler;
use utoipa_actix_web::service_config::ServiceConfig;

#[utoipa::path(
    tag = "Health",
    responses((status = 200, description = "Service is up")),
    summary = "Liveness probe"
)]
#[get("/health")]
async fn health_endpoint() -> impl Responder {
    HttpResponse::Ok().body("OK")
}

/// Shared handles every handler reads; register with `App::app_data`.
pub fn app_data(state: &AppState) -> web::Data<AppState> {
    web::Data::new(state.clone())
}

pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(default_error_handler)
}

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(health_endpoint)
        .service(users::login::login)
        .service(admin::dashboard)
        .service(admin::export_workbook);
}
