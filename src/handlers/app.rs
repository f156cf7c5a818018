//! Application factory.

use crate::{
    BASE_PATH,
    handlers::{anicrush, get_all_quotes, get_quotes, health, hianime_proxy, not_found, version},
    middleware::{
        CacheControl, RateLimit, RequestLogger, StaticFiles, cors_policy, error_envelope,
    },
    state::AppState,
};
use actix_web::{
    App, Error,
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Condition,
    web,
};

/// Creates the application with every route and middleware in place
///
/// Used by the listening entrypoint and by tests alike; a serverless host
/// adapter would mount the same factory.
///
/// - `/health` and `/v` sit outside the base path
/// - quotes, anime and anicrush routes are mounted under [`BASE_PATH`]
/// - files in the static directory, when present, answer ahead of every route
/// - anything else gets the 404 envelope
/// - the rate limiter is only active for publicly hosted deployments
pub fn create_app(
    state: AppState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let settings = state.settings.clone();
    let limiter = state.limiter.clone();

    let app = App::new()
        .app_data(web::Data::new(state))
        .route("/health", web::get().to(health))
        .route("/v", web::get().to(version))
        .service(
            web::scope(BASE_PATH)
                .service(web::resource("/quotes").route(web::get().to(get_quotes)))
                .service(web::resource("/quotes/all").route(web::get().to(get_all_quotes)))
                .service(web::resource("/anicrush").route(web::get().to(anicrush)))
                .service(web::resource("/hianime").route(web::get().to(hianime_proxy)))
                .service(web::resource("/hianime/{tail:.*}").route(web::get().to(hianime_proxy))),
        )
        .default_service(web::to(not_found));

    app.wrap(error_envelope())
        .wrap(Condition::new(
            settings.static_dir.is_dir(),
            StaticFiles::new(settings.static_dir.clone()),
        ))
        .wrap(Condition::new(
            settings.is_publicly_hosted,
            RateLimit::new(limiter),
        ))
        .wrap(CacheControl::new(settings.cache.clone()))
        .wrap(cors_policy(&settings.cors))
        .wrap(RequestLogger)
}
