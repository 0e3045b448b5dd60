use crate::core::AppError;
use actix_web::{
    body::{BoxBody, EitherBody},
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, ResponseError,
};
use argon2::{Argon2, PasswordHash, PasswordVerifier};
use futures_util::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

pub const API_KEY_HEADER: &str = "X-API-Key";

/// API key guard for the reporting API.
///
/// Keys are never stored; the guard holds argon2 PHC hashes and accepts a
/// request when the `X-API-Key` header verifies against any of them.
#[derive(Clone)]
pub struct ApiKeyAuth {
    hashes: Arc<Vec<String>>,
}

impl ApiKeyAuth {
    pub fn new(hashes: Vec<String>) -> Self {
        Self {
            hashes: Arc::new(hashes),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ApiKeyAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<BoxBody, B>>;
    type Error = Error;
    type InitError = ();
    type Transform = ApiKeyAuthMiddleware<S>;
    type Future = Ready<std::result::Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ApiKeyAuthMiddleware {
            service: Rc::new(service),
            hashes: self.hashes.clone(),
        }))
    }
}

pub struct ApiKeyAuthMiddleware<S> {
    service: Rc<S>,
    hashes: Arc<Vec<String>>,
}

impl<S, B> Service<ServiceRequest> for ApiKeyAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<BoxBody, B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, std::result::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let svc = self.service.clone();
        let hashes = self.hashes.clone();

        Box::pin(async move {
            let api_key = req
                .headers()
                .get(API_KEY_HEADER)
                .and_then(|h| h.to_str().ok())
                .map(str::to_string);

            let Some(api_key) = api_key else {
                let response = AppError::unauthorized("Missing X-API-Key header").error_response();
                return Ok(req.into_response(response).map_into_left_body());
            };

            // argon2 verification is CPU bound; keep it off the worker thread
            let accepted = web::block(move || {
                hashes
                    .iter()
                    .any(|hash| verify_api_key(&api_key, hash).unwrap_or(false))
            })
            .await
            .map_err(|e| AppError::internal(format!("API key verification failed: {}", e)))?;

            if !accepted {
                tracing::warn!(path = %req.path(), "Rejected request with invalid API key");
                let response = AppError::unauthorized("Invalid API key").error_response();
                return Ok(req.into_response(response).map_into_left_body());
            }

            svc.call(req).await.map(|res| res.map_into_right_body())
        })
    }
}

/// Helper function to hash API keys using Argon2
pub fn hash_api_key(api_key: &str) -> crate::core::Result<String> {
    use argon2::password_hash::{rand_core::OsRng, PasswordHasher, SaltString};

    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(api_key.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::internal(format!("Failed to hash API key: {}", e)))
}

/// Helper function to verify API keys using Argon2
pub fn verify_api_key(api_key: &str, hash: &str) -> crate::core::Result<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::internal(format!("Invalid hash format: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(api_key.as_bytes(), &parsed_hash)
        .is_ok())
}
