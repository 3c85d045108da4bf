use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{http::header, Error, HttpMessage};
use futures::future::LocalBoxFuture;

use crate::auth::firebase::TokenVerifier;
use crate::auth::probe::IdentityProbe;
use crate::auth::Principal;

/// Paths served without looking at the Authorization header.
const PUBLIC_PATHS: [&str; 3] = ["/health", "/login", "/api-docs/openapi.json"];

/// Attaches a [`Principal`] to requests carrying a valid Bearer ID token.
/// Requests without one pass through untouched; handlers decide how to gate.
#[derive(Clone)]
pub struct AuthLayer {
    verifier: Arc<dyn TokenVerifier>,
    probe: IdentityProbe,
}

impl AuthLayer {
    pub fn new(verifier: Arc<dyn TokenVerifier>, probe: IdentityProbe) -> Self {
        Self { verifier, probe }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthLayer
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddleware {
            service: Rc::new(service),
            inner: self.clone(),
        }))
    }
}

pub struct AuthMiddleware<S> {
    service: Rc<S>,
    inner: AuthLayer,
}

impl<S, B> Service<ServiceRequest> for AuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let token = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let srv = self.service.clone();
        let token = match token {
            Some(token) if !PUBLIC_PATHS.contains(&req.path()) => token,
            _ => return Box::pin(async move { srv.call(req).await }),
        };

        let inner = self.inner.clone();
        Box::pin(async move {
            match inner.verifier.verify(&token).await {
                Ok(verified) => {
                    let is_admin = inner.probe.is_admin(&verified.uid).await;
                    debug!(
                        "auth: '{}' verified for {} (admin: {})",
                        verified.uid,
                        req.path(),
                        is_admin
                    );
                    req.extensions_mut().insert(Principal {
                        uid: verified.uid,
                        email: verified.email,
                        is_admin,
                    });
                }
                Err(e) => warn!("auth: rejected bearer token on {}: {}", req.path(), e),
            }
            srv.call(req).await
        })
    }
}
