//! Static asset middleware.
//!
//! Runs ahead of the router: a `GET`/`HEAD` whose path names a file inside
//! the static directory is answered from disk, everything else continues to
//! the routes.

use actix_files::NamedFile;
use actix_web::{
    Error,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::Method,
};
use std::{
    future::{Ready, ready},
    path::{Path, PathBuf},
    pin::Pin,
    rc::Rc,
};

const INDEX_FILE: &str = "index.html";

/// Static file middleware factory
pub struct StaticFiles {
    root: Rc<PathBuf>,
}

impl StaticFiles {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Rc::new(root.into()),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for StaticFiles
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = StaticFilesMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StaticFilesMiddleware {
            service: Rc::new(service),
            root: Rc::clone(&self.root),
        }))
    }
}

/// The actual static file middleware service
pub struct StaticFilesMiddleware<S> {
    service: Rc<S>,
    root: Rc<PathBuf>,
}

impl<S, B> Service<ServiceRequest> for StaticFilesMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let candidate = match *req.method() {
            Method::GET | Method::HEAD => asset_path(&self.root, req.path()),
            _ => None,
        };
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            if let Some(path) = candidate {
                let is_file = tokio::fs::metadata(&path)
                    .await
                    .map(|meta| meta.is_file())
                    .unwrap_or(false);

                if is_file {
                    match NamedFile::open_async(&path).await {
                        Ok(file) => {
                            let (http_req, _) = req.into_parts();
                            let response = file.into_response(&http_req);
                            return Ok(
                                ServiceResponse::new(http_req, response).map_into_right_body()
                            );
                        }
                        Err(e) => {
                            tracing::warn!(
                                path = %path.display(),
                                error = %e,
                                "Static file unreadable"
                            );
                        }
                    }
                }
            }

            Ok(service.call(req).await?.map_into_left_body())
        })
    }
}

/// Maps a request path onto the static root
///
/// Directory paths resolve to their index file. Hidden segments, parent
/// segments and percent escapes never resolve.
fn asset_path(root: &Path, request_path: &str) -> Option<PathBuf> {
    let mut path = root.to_path_buf();
    for segment in request_path.split('/').filter(|s| !s.is_empty()) {
        if segment.starts_with('.') || segment.contains(['\\', '%', '\0']) {
            return None;
        }
        path.push(segment);
    }

    if request_path.ends_with('/') || request_path.is_empty() {
        path.push(INDEX_FILE);
    }
    Some(path)
}
