use actix_web::{FromRequest, HttpRequest, HttpMessage};
use futures_util::future::{ready, Ready};
use uuid::Uuid;

use crate::{entities::token::Claims, errors::{AppError, AuthError}, utils::valid_uuid::valid_uuid};

/// Claims the auth middleware attached to the request. 401 when absent.
#[derive(Debug)]
pub struct AuthClaims(pub Claims);

impl AuthClaims {
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        valid_uuid(&self.0.sub)
    }
}

impl FromRequest for AuthClaims {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<Claims>() {
            Some(claims) => ready(Ok(AuthClaims(claims.clone()))),
            None => ready(Err(AuthError::MissingCredentials.into())),
        }
    }
}

/// Like [`AuthClaims`] but 403 unless the admin claim is set.
#[derive(Debug)]
pub struct AdminClaims(pub Claims);

impl AdminClaims {
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        valid_uuid(&self.0.sub)
    }
}

impl FromRequest for AdminClaims {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<Claims>() {
            Some(claims) if claims.admin => {
                ready(Ok(AdminClaims(claims.clone())))
            }
            Some(_) => {
                ready(Err(AuthError::Forbidden("Admin access required".into()).into()))
            }
            None => {
                ready(Err(AuthError::MissingCredentials.into()))
            }
        }
    }
}
