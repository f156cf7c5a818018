//! Cache-Control middleware implementation.

use crate::config::CachePolicy;
use actix_web::{
    Error,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header::{CACHE_CONTROL, HeaderValue},
};
use std::{
    future::{Ready, ready},
    pin::Pin,
    rc::Rc,
};

/// Cache-Control middleware factory
///
/// Successful responses get the directive of their route group from the
/// [`CachePolicy`] table, error responses get the error directive. A header
/// already set by a handler wins.
pub struct CacheControl {
    policy: Rc<CachePolicy>,
}

impl CacheControl {
    /// Create a new cache-control middleware with the given policy table
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            policy: Rc::new(policy),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for CacheControl
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = CacheControlMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CacheControlMiddleware {
            service,
            policy: Rc::clone(&self.policy),
        }))
    }
}

/// The actual cache-control middleware service
pub struct CacheControlMiddleware<S> {
    service: S,
    policy: Rc<CachePolicy>,
}

impl<S, B> Service<ServiceRequest> for CacheControlMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let path = req.path().to_string();
        let policy = Rc::clone(&self.policy);
        let fut = self.service.call(req);

        Box::pin(async move {
            let mut res = fut.await?;
            if res.headers().contains_key(CACHE_CONTROL) {
                return Ok(res);
            }

            let status = res.status();
            let directive = if status.is_client_error() || status.is_server_error() {
                policy.error_directive.as_str()
            } else {
                policy.directive_for(&path)
            };

            if let Ok(value) = HeaderValue::from_str(directive) {
                res.headers_mut().insert(CACHE_CONTROL, value);
            }

            Ok(res)
        })
    }
}
