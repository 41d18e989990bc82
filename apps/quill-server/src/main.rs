//! # Quill Post Server
//!
//! Serves the post RPC API over Actix-web.

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod observability;
mod state;
mod telemetry;
mod tls;

use config::AppConfig;
use observability::RequestIdMiddleware;
use state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    telemetry::init_telemetry(&config.telemetry);

    tracing::info!(
        "Starting {} on {}:{}",
        config.telemetry.service_name,
        config.host,
        config.port
    );

    let state = AppState::new(config.database.as_ref()).await;

    let server = HttpServer::new(move || {
        App::new()
            .wrap(RequestIdMiddleware)
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
    });
    let addr = (config.host.as_str(), config.port);

    let server = match &config.tls {
        Some(tls) => {
            tracing::info!(
                cert = %tls.cert.display(),
                client_auth = tls.ca_cert.is_some(),
                "TLS enabled"
            );
            server.bind_rustls_0_23(addr, tls.load()?)?
        }
        None => server.bind(addr)?,
    };

    server.run().await
}
