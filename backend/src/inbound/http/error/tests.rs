//! Tests for HTTP error mapping.

use super::*;
use crate::domain::FieldErrors;
use actix_web::body::to_bytes;
use actix_web::http::header;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

#[fixture]
fn validation_error() -> Error {
    let mut fields = FieldErrors::new();
    fields.insert("title".to_owned(), "must be provided".to_owned());
    fields.insert("year".to_owned(), "must be greater than 1888".to_owned());
    Error::failed_validation(fields)
}

async fn body_json(error: &Error) -> (StatusCode, Value) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok()),
        Some("application/json")
    );
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    assert!(bytes.ends_with(b"\n"));
    let payload = serde_json::from_slice(&bytes).expect("error body is JSON");
    (status, payload)
}

#[rstest]
fn status_code_matches_error_code() {
    let cases = [
        (Error::invalid_request("bad"), StatusCode::BAD_REQUEST),
        (Error::not_found("missing"), StatusCode::NOT_FOUND),
        (Error::method_not_allowed("PATCH"), StatusCode::METHOD_NOT_ALLOWED),
        (
            Error::failed_validation(FieldErrors::new()),
            StatusCode::UNPROCESSABLE_ENTITY,
        ),
        (Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR),
    ];
    for (err, status) in cases {
        assert_eq!(ResponseError::status_code(&err), status);
    }
}

#[rstest]
#[actix_web::test]
async fn single_message_errors_use_string_envelope() {
    let (status, payload) = body_json(&Error::not_found(NOT_FOUND_MESSAGE)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        payload,
        json!({"error": "the requested resource could not be found"})
    );
}

#[rstest]
#[actix_web::test]
async fn validation_errors_use_field_map_envelope(validation_error: Error) {
    let (status, payload) = body_json(&validation_error).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        payload,
        json!({"error": {
            "title": "must be provided",
            "year": "must be greater than 1888",
        }})
    );
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted() {
    let (status, payload) =
        body_json(&Error::internal("connection refused by db at 10.0.0.5")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(payload, json!({"error": SERVER_ERROR_MESSAGE}));
}

#[rstest]
#[case(DecodeError::EmptyBody, "body must not be empty")]
#[case(
    DecodeError::UnknownField { name: "foo".to_owned() },
    "body contains unknown field \"foo\""
)]
#[case(
    DecodeError::BodyTooLarge { limit_bytes: 1_048_576 },
    "body must not be larger than 1048576 bytes"
)]
#[case(DecodeError::MultipleValues, "body must only contain a single JSON value")]
fn decode_errors_become_bad_requests(#[case] decode_error: DecodeError, #[case] message: &str) {
    let err = Error::from(decode_error);
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), message);
}

#[rstest]
fn blank_pass_through_cause_still_yields_a_message() {
    let err = Error::from(DecodeError::Other {
        cause: String::new(),
    });
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), "body could not be decoded");
}

#[rstest]
#[should_panic(expected = "invalid destination")]
fn invalid_destination_aborts() {
    let _ = Error::from(DecodeError::InvalidDestination { type_name: "()" });
}

#[rstest]
fn repository_errors_map_to_lookup_and_internal() {
    assert_eq!(
        Error::from(MovieRepositoryError::not_found()).code(),
        ErrorCode::NotFound
    );
    let internal = Error::from(MovieRepositoryError::query("deadlock detected"));
    assert_eq!(internal.code(), ErrorCode::InternalError);
    assert!(internal.message().contains("deadlock detected"));
}
