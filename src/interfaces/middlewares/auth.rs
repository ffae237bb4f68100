use actix_web::{
    body::BoxBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::{header::HeaderMap, Method},
    web, Error, HttpMessage, HttpResponse,
};
use futures_util::future::{ok, Ready, LocalBoxFuture};
use std::{rc::Rc, task::{Context, Poll}};

use crate::{
    entities::token::Claims,
    errors::AuthError,
    repositories::token::TokenServiceRepository,
    AppState,
};

pub const ADMIN_PREFIX: &str = "/api/v1/admin";

pub struct AuthMiddleware;

impl<S> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthMiddlewareService {
            service: Rc::new(service),
        })
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            if is_public_route(req.path(), req.method()) {
                return service.call(req).await;
            }

            let state = match req.app_data::<web::Data<AppState>>() {
                Some(state) => state.clone(),
                None => {
                    tracing::error!("AppState missing in middleware");
                    return Ok(reject(req, AuthError::MissingAppState));
                }
            };

            let Some(token) = bearer_token(req.headers()) else {
                tracing::warn!(path = %req.path(), "Missing or malformed Authorization header");
                return Ok(reject(req, AuthError::MissingCredentials));
            };

            let claims = match state.auth_handler.token_service.decode_jwt(&token) {
                Ok(decoded) => decoded.claims,
                Err(e) => {
                    tracing::warn!(path = %req.path(), "Rejected access token: {}", e);
                    return Ok(reject(req, e));
                }
            };

            // Only signed, unexpired tokens reach the deny-list.
            match state.auth_handler.is_access_token_revoked(&token).await {
                Ok(true) => return Ok(reject(req, AuthError::TokenRevoked)),
                Ok(false) => {}
                Err(e) => tracing::warn!("Deny-list lookup failed, continuing: {}", e),
            }

            if let Err(forbidden) = enforce_admin_access(req.path(), &claims) {
                return Ok(reject(req, forbidden));
            }

            req.extensions_mut().insert(claims);
            service.call(req).await
        })
    }
}

fn is_public_route(path: &str, method: &Method) -> bool {
    if *method == Method::OPTIONS {
        return true;
    }

    matches!(
        (path, method.as_str()),
        ("/", "GET") |
        ("/api/v1/health", "GET") |
        ("/api/v1/auth/refresh-token", "POST") |
        ("/api/v1/auth/login", "POST") |
        ("/api/v1/auth/register", "POST")
    )
}

/// Token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .and_then(|header| {
            let mut parts = header.split_whitespace();
            match (parts.next(), parts.next(), parts.next()) {
                (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => {
                    Some(token.to_string())
                }
                _ => None,
            }
        })
}

fn enforce_admin_access(path: &str, claims: &Claims) -> Result<(), AuthError> {
    if path.starts_with(ADMIN_PREFIX) && !claims.admin {
        tracing::warn!(user_id = %claims.sub, path, "Admin access required");
        return Err(AuthError::Forbidden("Admin access required".into()));
    }
    Ok(())
}

fn reject(req: ServiceRequest, err: AuthError) -> ServiceResponse<BoxBody> {
    let res = HttpResponse::from_error(err);
    req.into_response(res)
}
