//! Central error normalization.
//!
//! Handlers return [`ApiError`](crate::error::ApiError), which already renders
//! the JSON envelope. Everything else that fails (extractor rejections,
//! unmatched methods, framework errors) comes out of actix as plain text;
//! this middleware rewrites those bodies into the same envelope.

use crate::models::Envelope;
use actix_web::{
    HttpResponse, Result,
    dev::ServiceResponse,
    http::header::{CONTENT_LENGTH, CONTENT_TYPE, HeaderMap},
    middleware::{ErrorHandlerResponse, ErrorHandlers},
};

const GENERIC_SERVER_ERROR: &str = "Internal Server Error";

/// Error handler middleware covering every 4xx and 5xx response
pub fn error_envelope<B: 'static>() -> ErrorHandlers<B> {
    ErrorHandlers::new().default_handler(render_envelope)
}

fn render_envelope<B>(res: ServiceResponse<B>) -> Result<ErrorHandlerResponse<B>> {
    let status = res.status();
    let detail = res.response().error().map(|e| e.to_string());

    if status.is_server_error() {
        tracing::error!(
            status = status.as_u16(),
            method = %res.request().method(),
            path = %res.request().path(),
            error = detail.as_deref().unwrap_or("-"),
            "Request failed"
        );
    }

    if is_json(res.headers()) {
        return Ok(ErrorHandlerResponse::Response(res.map_into_left_body()));
    }

    let message = if status.is_server_error() {
        GENERIC_SERVER_ERROR.to_string()
    } else {
        detail
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Error").to_string())
    };

    let (req, original) = res.into_parts();
    let mut response = HttpResponse::build(status);
    for (name, value) in original.headers() {
        if name != CONTENT_TYPE && name != CONTENT_LENGTH {
            response.append_header((name.clone(), value.clone()));
        }
    }
    let response = response.json(Envelope::failure(message));

    Ok(ErrorHandlerResponse::Response(
        ServiceResponse::new(req, response).map_into_right_body(),
    ))
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, http::StatusCode, test, web};

    #[actix_web::test]
    async fn test_plain_text_errors_become_envelopes() {
        let app = test::init_service(
            App::new()
                .wrap(error_envelope())
                .route(
                    "/boom",
                    web::get().to(|| async {
                        Err::<HttpResponse, _>(actix_web::error::ErrorInternalServerError(
                            "db password leaked in message",
                        ))
                    }),
                )
                .route(
                    "/bad",
                    web::get().to(|| async {
                        Err::<HttpResponse, _>(actix_web::error::ErrorBadRequest("bad page"))
                    }),
                ),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/boom").to_request()).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(
            body,
            serde_json::json!({"success": false, "error": "Internal Server Error"})
        );

        let resp = test::call_service(&app, test::TestRequest::get().uri("/bad").to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "bad page");
    }

    #[actix_web::test]
    async fn test_method_not_allowed_is_wrapped() {
        let app = test::init_service(
            App::new()
                .wrap(error_envelope())
                .service(web::resource("/only-get").route(web::get().to(HttpResponse::Ok))),
        )
        .await;

        let req = test::TestRequest::post().uri("/only-get").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert!(body["error"].is_string());
    }

    #[actix_web::test]
    async fn test_json_errors_pass_through() {
        let app = test::init_service(App::new().wrap(error_envelope()).route(
            "/json",
            web::get().to(|| async {
                HttpResponse::NotFound().json(Envelope::failure("custom"))
            }),
        ))
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/json").to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "custom");
    }
}
