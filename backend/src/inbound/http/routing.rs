//! Route table for the `/api/v1` surface.
//!
//! Each resource carries a default service so a known path hit with an
//! unsupported method answers `405` with an envelope rather than Actix's
//! empty response. Paths matching nothing fall through to
//! [`route_not_found`], which the application installs as its default
//! service.

use actix_web::{HttpRequest, HttpResponse, web};

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::NOT_FOUND_MESSAGE;
use crate::inbound::http::health::healthcheck;
use crate::inbound::http::movies::{create_movie, delete_movie, show_movie, update_movie};

/// Register every API resource.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use greenlight::inbound::http::routing::{configure, route_not_found};
///
/// let _app = App::new()
///     .configure(configure)
///     .default_service(web::to(route_not_found));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(
                web::resource("/healthcheck")
                    .route(web::get().to(healthcheck))
                    .default_service(web::to(method_not_allowed)),
            )
            .service(
                web::resource("/movies")
                    .route(web::post().to(create_movie))
                    .default_service(web::to(method_not_allowed)),
            )
            .service(
                web::resource("/movies/{id}")
                    .route(web::get().to(show_movie))
                    .route(web::put().to(update_movie))
                    .route(web::delete().to(delete_movie))
                    .default_service(web::to(method_not_allowed)),
            ),
    );
}

/// Fallback for paths with no registered resource.
pub async fn route_not_found() -> ApiResult<HttpResponse> {
    Err(Error::not_found(NOT_FOUND_MESSAGE))
}

async fn method_not_allowed(req: HttpRequest) -> ApiResult<HttpResponse> {
    Err(Error::method_not_allowed(req.method()))
}
