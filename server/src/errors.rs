use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Safe message returned to clients for internal failures. Full detail stays
/// in the server logs.
pub const GENERIC_ERROR_MESSAGE: &str = "حدث خطأ ما";

/// An error report paired with the HTTP status it should surface as.
pub struct ServerError(pub color_eyre::Report, pub StatusCode);

pub type ServerResult<T> = Result<T, ServerError>;

impl<E> From<E> for ServerError
where
    E: Into<color_eyre::Report>,
{
    fn from(err: E) -> Self {
        Self(err.into(), StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let ServerError(report, status) = self;

        if status.is_server_error() {
            tracing::error!(error = ?report, status = %status, "Request failed");
        } else {
            tracing::warn!(error = ?report, status = %status, "Request rejected");
        }

        let label = if status.is_client_error() { "fail" } else { "error" };

        (
            status,
            Json(json!({
                "status": label,
                "message": GENERIC_ERROR_MESSAGE,
            })),
        )
            .into_response()
    }
}
