//! Application healthcheck.

use actix_web::http::StatusCode;
use actix_web::http::header::HeaderMap;
use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::{Envelope, write_json};
use crate::inbound::http::state::HttpState;

#[derive(Debug, Serialize)]
struct SystemInfo<'a> {
    environment: &'a str,
    version: &'a str,
}

/// Report availability together with the running environment and version.
pub async fn healthcheck(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let envelope = Envelope::new().with("status", &"available")?.with(
        "system_info",
        &SystemInfo {
            environment: &state.environment,
            version: &state.version,
        },
    )?;
    Ok(write_json(StatusCode::OK, &envelope, &HeaderMap::new())?)
}
