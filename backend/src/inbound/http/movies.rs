//! Movie CRUD handlers.
//!
//! ```text
//! POST   /api/v1/movies
//! GET    /api/v1/movies/{id}
//! PUT    /api/v1/movies/{id}
//! DELETE /api/v1/movies/{id}
//! ```

use actix_web::http::StatusCode;
use actix_web::http::header::{HeaderMap, HeaderValue, LOCATION};
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::domain::{Error, Movie, MovieDraft, Runtime, Validator, validate_movie};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::{Envelope, write_json};
use crate::inbound::http::error::NOT_FOUND_MESSAGE;
use crate::inbound::http::extract::{StrictJson, read_json};
use crate::inbound::http::state::HttpState;

/// Request body accepted by create and update.
///
/// Missing keys decode to zero values so validation, not the decoder,
/// reports them.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MovieInput {
    pub title: String,
    pub year: i32,
    pub runtime: Runtime,
    pub genres: Vec<String>,
}

impl From<MovieInput> for MovieDraft {
    fn from(value: MovieInput) -> Self {
        let MovieInput {
            title,
            year,
            runtime,
            genres,
        } = value;
        Self {
            title,
            year,
            runtime,
            genres,
        }
    }
}

/// Parse a path identifier; anything other than a positive integer is a
/// missing resource.
fn parse_id(raw: &str) -> ApiResult<i64> {
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id >= 1)
        .ok_or_else(|| Error::not_found(NOT_FOUND_MESSAGE))
}

fn validated(draft: MovieDraft) -> ApiResult<MovieDraft> {
    let mut v = Validator::new();
    validate_movie(&mut v, &draft);
    if v.valid() {
        Ok(draft)
    } else {
        Err(Error::failed_validation(v.into_errors()))
    }
}

fn movie_response(status: StatusCode, movie: &Movie, headers: &HeaderMap) -> ApiResult<HttpResponse> {
    let envelope = Envelope::new().with("movie", movie)?;
    Ok(write_json(status, &envelope, headers)?)
}

/// Create a movie from a strictly decoded body.
pub async fn create_movie(
    state: web::Data<HttpState>,
    StrictJson(input): StrictJson<MovieInput>,
) -> ApiResult<HttpResponse> {
    let draft = validated(input.into())?;
    let movie = state.movies.insert(draft).await?;

    let location = HeaderValue::from_str(&format!("/api/v1/movies/{}", movie.id))
        .map_err(|err| Error::internal(format!("invalid location header: {err}")))?;
    let mut headers = HeaderMap::new();
    headers.insert(LOCATION, location);
    movie_response(StatusCode::CREATED, &movie, &headers)
}

/// Fetch a single movie.
pub async fn show_movie(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_id(&path)?;
    let movie = state.movies.get(id).await?;
    movie_response(StatusCode::OK, &movie, &HeaderMap::new())
}

/// Replace a movie's fields.
///
/// The record is looked up before the body is read, so a missing movie is
/// reported as `404` whatever the body contains.
pub async fn update_movie(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    mut payload: web::Payload,
) -> ApiResult<HttpResponse> {
    let id = parse_id(&path)?;
    let mut movie = state.movies.get(id).await?;

    let input: MovieInput = read_json(&mut payload).await?;
    movie.apply(validated(input.into())?);

    let movie = state.movies.update(movie).await?;
    movie_response(StatusCode::OK, &movie, &HeaderMap::new())
}

/// Delete a movie.
pub async fn delete_movie(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_id(&path)?;
    state.movies.delete(id).await?;
    let envelope = Envelope::new().with("message", &"movie deleted")?;
    Ok(write_json(StatusCode::OK, &envelope, &HeaderMap::new())?)
}
