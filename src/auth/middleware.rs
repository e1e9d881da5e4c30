use std::{
    future::{ready, Ready},
    rc::Rc,
};

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{Header, AUTHORIZATION},
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use actix_web_httpauth::headers::authorization::{Authorization, Bearer};
use futures::future::LocalBoxFuture;

use crate::{
    app_state::AppState,
    auth::Claims,
    errors::{AppError, AppResult},
};

/// Rejects requests without a valid bearer token and stores the decoded
/// [`Claims`] in the request extensions for [`AuthenticatedUser`].
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let claims = match authenticate(&req) {
                Ok(claims) => claims,
                Err(err) => return Ok(req.error_response(err).map_into_right_body()),
            };

            req.extensions_mut().insert(claims);

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

fn authenticate(req: &ServiceRequest) -> AppResult<Claims> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::ServerMisconfiguration("AppState not registered".to_string()))?;

    if !req.headers().contains_key(AUTHORIZATION) {
        return Err(AppError::Unauthenticated(
            "Missing authorization header".to_string(),
        ));
    }

    let bearer = Authorization::<Bearer>::parse(req).map_err(|_| {
        AppError::Unauthenticated("Invalid authorization header format".to_string())
    })?;

    state.jwt_service.validate_token(bearer.into_scheme().token())
}

/// Extractor for the identity established by [`AuthMiddleware`].
pub struct AuthenticatedUser(pub Claims);

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let claims = req
            .extensions()
            .get::<Claims>()
            .cloned()
            .ok_or_else(|| AppError::Unauthenticated("Not authenticated".to_string()));

        ready(claims.map(AuthenticatedUser))
    }
}
