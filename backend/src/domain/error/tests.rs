//! Tests for domain error construction and trace propagation.

use super::*;
use crate::middleware::trace::TraceId;
use rstest::{fixture, rstest};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn base_error() -> Error {
    Error::invalid_request("bad")
}

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::not_found("missing"), ErrorCode::NotFound)]
#[case(Error::method_not_allowed("PATCH"), ErrorCode::MethodNotAllowed)]
#[case(Error::failed_validation(FieldErrors::new()), ErrorCode::FailedValidation)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn method_not_allowed_names_the_method() {
    let err = Error::method_not_allowed("PATCH");
    assert_eq!(
        err.message(),
        "the PATCH method is not supported for this resource"
    );
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn try_with_trace_id_rejects_empty_values(base_error: Error) {
    let result = base_error.try_with_trace_id("   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyTraceId)));
}

#[rstest]
fn only_validation_errors_carry_fields(base_error: Error) {
    assert!(base_error.field_errors().is_none());

    let mut fields = FieldErrors::new();
    fields.insert("year".to_owned(), "must be provided".to_owned());
    let err = Error::failed_validation(fields.clone());
    assert_eq!(err.field_errors(), Some(&fields));
}

#[rstest]
fn new_returns_none_when_trace_id_out_of_scope() {
    let error = Error::internal("boom");
    assert!(error.trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope() {
    let trace_id: TraceId = TRACE_ID.parse().expect("fixture is a valid UUID");
    let error = TraceId::scope(trace_id, async move { Error::internal("boom") }).await;

    assert_eq!(error.trace_id(), Some(TRACE_ID));
}
