use actix_web::HttpServer;
use aniwatch_api::{
    AppState, Settings, create_app, spawn_health_loop,
    telemetry::{LogConfig, init_tracing, log_build_info},
};
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // .env is optional; real environment variables take precedence
    dotenvy::dotenv().ok();

    if let Err(e) = init_tracing(&LogConfig::from_env()) {
        eprintln!("failed to initialise tracing: {e}");
    }
    log_build_info();

    let settings = Settings::from_env().map_err(|e| {
        error!(error = %e, "invalid configuration");
        std::io::Error::other(e)
    })?;

    if settings.is_serverless_deployment {
        info!("serverless deployment: the host owns the listener, not binding a port");
        return Ok(());
    }

    let bind_address = (settings.host.clone(), settings.port);
    let health_settings = settings.clone();

    let state = AppState::from_settings(settings).map_err(|e| {
        error!(error = %e, "failed to build application state");
        std::io::Error::other(e)
    })?;

    let server = HttpServer::new(move || create_app(state.clone())).bind(&bind_address)?;
    info!(
        "aniwatch-api RUNNING at http://localhost:{}",
        bind_address.1
    );

    let _health_loop = spawn_health_loop(&health_settings);

    server.run().await
}
