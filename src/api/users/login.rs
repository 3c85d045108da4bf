use crate::auth::Credential;
use crate::enums::users::{LoginReq, LoginResp};
use crate::services::SignInError;
use crate::shell::Route;
use crate::AppState;
use actix_web::{post, web, HttpResponse, Responder};
use log::debug;

#[utoipa::path(
    tag = "User",
    request_body = LoginReq,
    responses(
        (status = 200, description = "Signed in as an admin; use id_token as the Bearer token", body = LoginResp),
        (status = 401, description = "Credential exchange failed", body = LoginResp),
        (status = 403, description = "Signed in, but not an admin", body = LoginResp)
    ),
    summary = "Sign in to the admin console"
)]
#[post("/login")]
pub(crate) async fn login(state: web::Data<AppState>, req_body: web::Json<LoginReq>) -> impl Responder {
    let LoginReq { email, password } = req_body.into_inner();
    let mut flow = state.sign_in_flow();

    match flow.submit(Credential::new(email.clone(), password)).await {
        Ok(signed_in) => {
            let redirect = flow.take_navigation().unwrap_or(Route::Admin);
            debug!("login: admitted '{}'", email);
            HttpResponse::Ok().json(LoginResp {
                status: "ok".to_string(),
                redirect: Some(redirect.path().to_string()),
                id_token: Some(signed_in.id_token),
                error: None,
            })
        }
        Err(e) => {
            debug!("login: '{}' not admitted: {}", email, e);
            let body = LoginResp {
                status: "error".to_string(),
                redirect: None,
                id_token: None,
                error: Some(e.to_string()),
            };
            match e {
                SignInError::AccessDenied => HttpResponse::Forbidden().json(body),
                _ => HttpResponse::Unauthorized().json(body),
            }
        }
    }
}
