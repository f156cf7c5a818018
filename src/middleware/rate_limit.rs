//! Rate limiting middleware.

use crate::{
    error::ApiError,
    services::{RateLimitDecision, SimpleRateLimiter},
    utils::extract_client_ip,
};
use actix_web::{
    Error, ResponseError,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header::{HeaderName, HeaderValue},
};
use std::{
    future::{Ready, ready},
    pin::Pin,
    time::Duration,
};

/// Rate limiting middleware factory
///
/// Rejects requests past the per-client budget with 429 before they reach the
/// router. Allowed responses carry `RateLimit-Limit` and
/// `RateLimit-Remaining`.
pub struct RateLimit {
    limiter: SimpleRateLimiter,
}

impl RateLimit {
    pub fn new(limiter: SimpleRateLimiter) -> Self {
        Self { limiter }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service,
            limiter: self.limiter.clone(),
        }))
    }
}

/// The actual rate limiting middleware service
pub struct RateLimitMiddleware<S> {
    service: S,
    limiter: SimpleRateLimiter,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let client = extract_client_ip(req.request());

        match self.limiter.check_rate_limit(&client) {
            RateLimitDecision::Limited { retry_after } => {
                tracing::warn!(
                    client = %client,
                    path = %req.path(),
                    retry_after_secs = retry_after.as_secs(),
                    "Rate limit exceeded"
                );
                let response = ApiError::RateLimited {
                    retry_after_secs: ceil_secs(retry_after),
                }
                .error_response();
                let res = req.into_response(response).map_into_right_body();
                Box::pin(async move { Ok(res) })
            }
            RateLimitDecision::Allowed { remaining } => {
                let limit = self.limiter.config().max_requests;
                let fut = self.service.call(req);

                Box::pin(async move {
                    let mut res = fut.await?;
                    let headers = res.headers_mut();
                    headers.insert(
                        HeaderName::from_static("ratelimit-limit"),
                        HeaderValue::from(limit),
                    );
                    headers.insert(
                        HeaderName::from_static("ratelimit-remaining"),
                        HeaderValue::from(remaining),
                    );
                    Ok(res.map_into_left_body())
                })
            }
        }
    }
}

/// Whole seconds, rounded up, never below one
fn ceil_secs(duration: Duration) -> u64 {
    let secs = duration.as_secs() + u64::from(duration.subsec_nanos() > 0);
    secs.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceil_secs() {
        assert_eq!(ceil_secs(Duration::from_millis(0)), 1);
        assert_eq!(ceil_secs(Duration::from_millis(1500)), 2);
        assert_eq!(ceil_secs(Duration::from_secs(30)), 30);
    }
}
