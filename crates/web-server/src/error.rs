use aggregator::AggregatorError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] database::DbError),
    #[error("Aggregation error: {0}")]
    Aggregator(#[from] AggregatorError),
    #[error("Report error: {0}")]
    Report(#[from] report::ReportError),
    #[error("{0}")]
    InvalidSelector(#[from] core_types::CoreError),
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InvalidSelector(err)
            | AppError::Aggregator(AggregatorError::InvalidSelector(err)) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            AppError::Database(db_err)
            | AppError::Aggregator(AggregatorError::Database(db_err)) => {
                tracing::error!(error = ?db_err, "Database error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal database error occurred".to_string(),
                )
            }
            AppError::Report(report_err) => {
                tracing::error!(error = ?report_err, "Report assembly error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An error occurred while building the report".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::CoreError;

    #[test]
    fn invalid_selector_is_a_bad_request() {
        let response = AppError::from(CoreError::InvalidSelector(-1)).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let nested = AppError::from(AggregatorError::from(CoreError::InvalidSelector(-2)));
        assert_eq!(nested.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn misaligned_report_is_a_server_error() {
        let err = report::ReportError::SeriesMisaligned {
            chart: "c".to_string(),
            series: "s".to_string(),
            labels: 2,
            values: 1,
        };
        let response = AppError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
