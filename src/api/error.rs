//! API error envelope and conversions from internal error types.

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::auth::models::AuthError;
use crate::errors::Error;

/// Single message returned for every bearer authentication failure. Which
/// check failed (signature, expiry, kind, account state) is deliberately not
/// revealed to the caller.
const UNAUTHENTICATED_MESSAGE: &str = "Unauthorized: authentication required";

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Conflict(String),
    NotFound(String),
    Unauthorized(String),
    Forbidden(String),
    ServiceUnavailable(String),
    Internal(String),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let error_kind = match self {
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Conflict(_) => "conflict",
            ApiError::NotFound(_) => "not_found",
            ApiError::Unauthorized(_) => "unauthorized",
            ApiError::Forbidden(_) => "forbidden",
            ApiError::ServiceUnavailable(_) => "service_unavailable",
            ApiError::Internal(_) => "internal_error",
        };

        let message = match self {
            ApiError::BadRequest(msg)
            | ApiError::Conflict(msg)
            | ApiError::NotFound(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::ServiceUnavailable(msg)
            | ApiError::Internal(msg) => msg,
        };

        (status, Json(ErrorBody { error: error_kind, message })).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::Validation { message, .. } => ApiError::BadRequest(message),
            Error::NotFound { resource_type, id } => {
                ApiError::NotFound(format!("{} '{}' not found", resource_type, id))
            }
            Error::Conflict { message, .. } => ApiError::Conflict(message),
            Error::Auth { message, .. } => ApiError::Unauthorized(message),
            Error::Database { source, context } => {
                if let Some(db_err) = source.as_database_error() {
                    if let Some(code) = db_err.code() {
                        if code.as_ref() == "2067" || code.as_ref().starts_with("SQLITE_CONSTRAINT")
                        {
                            return ApiError::Conflict(context);
                        }
                    }
                }
                ApiError::Internal(context)
            }
            Error::Serialization { context, .. } => ApiError::BadRequest(context),
            Error::Config { message, .. } | Error::Internal { message, .. } => {
                ApiError::Internal(message)
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            // Every authentication failure collapses to the same opaque 401
            // so callers cannot probe which check rejected them.
            AuthError::MissingCredential
            | AuthError::UnsupportedScheme
            | AuthError::InvalidSignature
            | AuthError::Expired
            | AuthError::WrongTokenKind
            | AuthError::AccountNotFound
            | AuthError::AccountDisabled(_) => {
                ApiError::Unauthorized(UNAUTHENTICATED_MESSAGE.to_string())
            }
            AuthError::Persistence(inner) => {
                ApiError::ServiceUnavailable(format!("auth service unavailable: {}", inner))
            }
        }
    }
}

impl ApiError {
    pub fn unauthorized<S: Into<String>>(msg: S) -> Self {
        ApiError::Unauthorized(msg.into())
    }

    pub fn forbidden<S: Into<String>>(msg: S) -> Self {
        ApiError::Forbidden(msg.into())
    }
}
