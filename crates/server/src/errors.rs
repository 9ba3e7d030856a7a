use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use common::INVALID_REQUEST_BODY;
use service::ServiceError;
use thiserror::Error;
use tracing::{error, info};

/// Failure of one HTTP operation.
///
/// Everything except not-found collapses to an opaque 500; the cause is only
/// logged locally.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request: {0}")]
    BadRequest(String),
    #[error("unresolvable redirect name: {0}")]
    UnknownName(String),
    #[error("destination is not a valid Location header: {0}")]
    InvalidLocation(String),
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::UnknownName(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidLocation(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Service(ServiceError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Service(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::BadRequest(reason) => {
                info!(%reason, "request envelope rejected");
                (status, INVALID_REQUEST_BODY).into_response()
            }
            ApiError::UnknownName(reason) => {
                info!(%reason, "redirect name rejected");
                status.into_response()
            }
            ApiError::InvalidLocation(reason) => {
                error!(%reason, "cannot redirect");
                status.into_response()
            }
            ApiError::Service(e @ ServiceError::NotFound(_)) => {
                info!(error = %e, "not found");
                status.into_response()
            }
            ApiError::Service(e) => {
                error!(error = %e, code = %e.code(), "store operation failed");
                status.into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(ApiError::BadRequest("eof".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::from(ServiceError::not_found("x")).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::UnknownName("utf8".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::InvalidLocation("nl".into()).status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            ApiError::from(ServiceError::Read("bad".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::from(ServiceError::Internal("join".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
