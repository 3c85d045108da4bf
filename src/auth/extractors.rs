use crate::auth::principal::Principal;
use crate::shell::Route;
use actix_web::dev::Payload;
use actix_web::http::{header, StatusCode};
use actix_web::{FromRequest, HttpMessage, HttpRequest, HttpResponse, ResponseError};
use futures::future::{ready, Ready};
use serde_json::json;

/// Why a request did not reach an admin-only handler. Both cases send the
/// operator to the sign-in page.
#[derive(Debug, thiserror::Error)]
pub enum AdminGateError {
    #[error("sign in required")]
    Unauthenticated,
    #[error("Access denied. You are not an admin.")]
    NotAdmin,
}

impl ResponseError for AdminGateError {
    fn status_code(&self) -> StatusCode {
        StatusCode::SEE_OTHER
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::SeeOther()
            .insert_header((header::LOCATION, Route::Login.path()))
            .json(json!({
                "status": "error",
                "error": self.to_string(),
                "redirect": Route::Login.path(),
            }))
    }
}

/// A principal holding the admin capability.
pub struct AdminPrincipal(pub Principal);

impl FromRequest for AdminPrincipal {
    type Error = AdminGateError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = match req.extensions().get::<Principal>() {
            Some(p) if p.is_admin => Ok(AdminPrincipal(p.clone())),
            Some(p) => {
                info!("admin gate: '{}' is not an admin", p.uid);
                Err(AdminGateError::NotAdmin)
            }
            None => Err(AdminGateError::Unauthenticated),
        };
        ready(result)
    }
}
