/*
 * Responsibility
 * - HTTP-facing AppError
 * - IntoResponse (status + JSON error body)
 * - Map SpaAuthError kinds onto status codes (config -> 400, token -> 401)
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::services::spa_auth::SpaAuthError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("token expired")]
    TokenExpired,

    #[error("internal server error")]
    Internal,
}

#[derive(Serialize)]
struct ErrorResponseBody {
    error: ErrorBody,
}

#[derive(Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            AppError::TokenExpired => (StatusCode::UNAUTHORIZED, "TOKEN_EXPIRED"),
            AppError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL"),
        };

        let body = ErrorResponseBody {
            error: ErrorBody {
                code,
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<SpaAuthError> for AppError {
    fn from(e: SpaAuthError) -> Self {
        match e {
            SpaAuthError::Configuration(_) | SpaAuthError::InvalidPayload(_) => {
                AppError::BadRequest(e.to_string())
            }
            SpaAuthError::TokenInvalid(_) if e.is_expired() => AppError::TokenExpired,
            SpaAuthError::TokenInvalid(_) => AppError::Unauthorized,
            SpaAuthError::Signing(_) | SpaAuthError::UnexpectedTokenShape { .. } => {
                error!(error = %e, "token issuance failed");
                AppError::Internal
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_errors_map_to_status_codes() {
        let cases = [
            (
                SpaAuthError::Configuration("jwtAccessSecretKey"),
                StatusCode::BAD_REQUEST,
            ),
            (SpaAuthError::InvalidPayload(None), StatusCode::BAD_REQUEST),
            (
                SpaAuthError::UnexpectedTokenShape { segments: 5 },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            let res = AppError::from(err).into_response();
            assert_eq!(res.status(), status);
        }
    }

    #[test]
    fn configuration_message_is_kept() {
        let err = AppError::from(SpaAuthError::Configuration("jwtRefreshSecretKey"));
        assert_eq!(err.to_string(), "(jwtRefreshSecretKey) field is required");
    }
}
