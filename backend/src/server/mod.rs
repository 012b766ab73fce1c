//! Server construction and middleware wiring.

mod config;

pub use config::ServerSettings;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use greenlight::Trace;
use greenlight::inbound::http::routing::{configure, route_not_found};
use greenlight::inbound::http::state::HttpState;
use greenlight::outbound::persistence::InMemoryMovieRepository;

fn build_app(
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(http_state)
        .wrap(Trace)
        .configure(configure)
        .default_service(web::to(route_not_found))
}

/// Construct the HTTP server for the given settings.
///
/// # Errors
/// Returns [`std::io::Error`] when the environment name is unknown or the
/// socket cannot be bound.
pub fn create_server(settings: &ServerSettings) -> std::io::Result<Server> {
    let environment = settings
        .environment()
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidInput, err))?;
    let http_state = web::Data::new(HttpState::new(
        Arc::new(InMemoryMovieRepository::new()),
        environment.as_str(),
    ));
    let bind_addr = settings.bind_addr();

    let server = HttpServer::new(move || build_app(http_state.clone()))
        .bind(bind_addr)?
        .run();

    info!(addr = %bind_addr, env = %environment, "starting server");
    Ok(server)
}
