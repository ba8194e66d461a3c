use actix_web::{
    body::{EitherBody, MessageBody},
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderValue, AUTHORIZATION},
    web, Error, HttpMessage, ResponseError,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use uuid::Uuid;

use crate::auth::token::{Claims, TokenService};
use crate::error::AppError;

/// The verified caller, attached to the request by [`AuthGate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub subject_id: Uuid,
    pub subject_email: String,
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Self {
            subject_id: claims.sub,
            subject_email: claims.email,
        }
    }
}

/// Pulls the token out of an `Authorization: Bearer <token>` header.
/// The scheme is case-insensitive; an empty token counts as no token.
fn bearer_token(header: Option<&HeaderValue>) -> Option<&str> {
    let value = header?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }
    Some(token)
}

/// Decides whether a request may proceed.
///
/// No token, or a token that fails verification for any reason, yields the
/// same `AppError::Unauthorized`. The specific cause is only logged.
pub fn authorize(header: Option<&HeaderValue>, tokens: &TokenService) -> Result<Identity, AppError> {
    let token = match bearer_token(header) {
        Some(token) => token,
        None => {
            log::debug!("auth gate: rejected request without bearer token");
            return Err(AppError::Unauthorized);
        }
    };

    tokens.verify(token).map(Identity::from).map_err(|reason| {
        log::debug!("auth gate: rejected token: {}", reason);
        AppError::Unauthorized
    })
}

/// Middleware guarding every route it wraps.
///
/// Verified requests get an [`Identity`] in their extensions and continue to
/// the handler; anything else is answered with 401 before the handler runs.
#[derive(Clone)]
pub struct AuthGate {
    tokens: web::Data<TokenService>,
}

impl AuthGate {
    pub fn new(tokens: web::Data<TokenService>) -> Self {
        Self { tokens }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthGateService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGateService {
            service,
            tokens: self.tokens.clone(),
        }))
    }
}

pub struct AuthGateService<S> {
    service: S,
    tokens: web::Data<TokenService>,
}

impl<S, B> Service<ServiceRequest> for AuthGateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let outcome = authorize(req.headers().get(AUTHORIZATION), &self.tokens);
        match outcome {
            Ok(identity) => {
                req.extensions_mut().insert(identity);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Err(app_err) => {
                let response = req
                    .into_response(app_err.error_response())
                    .map_into_right_body();
                Box::pin(async move { Ok(response) })
            }
        }
    }
}
