use axum::{http::StatusCode, response::IntoResponse};
use pretty_assertions::assert_eq;
use recurslot_api::middleware::error_handling::{handle_middleware_error, AppError};
use recurslot_core::errors::SlotError;
use rstest::rstest;

#[rstest]
#[case(SlotError::NotFound("slot".into()), StatusCode::NOT_FOUND)]
#[case(SlotError::Validation("bad".into()), StatusCode::BAD_REQUEST)]
#[case(SlotError::Database(eyre::eyre!("down")), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(SlotError::Timeout(120), StatusCode::GATEWAY_TIMEOUT)]
#[case(SlotError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR)]
fn test_error_status_mapping(#[case] error: SlotError, #[case] expected: StatusCode) {
    let response = AppError(error).into_response();

    assert_eq!(response.status(), expected);
}

#[test]
fn test_eyre_report_maps_to_database_error() {
    let err: AppError = eyre::eyre!("pool exhausted").into();

    assert!(matches!(err.0, SlotError::Database(_)));
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_unknown_middleware_error_maps_to_500() {
    let response = handle_middleware_error("layer failed".into()).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
