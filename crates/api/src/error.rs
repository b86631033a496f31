use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use quanda_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `quanda_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A lookup by a natural key (username, tag title) found nothing.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Core(CoreError::Validation(errors.to_string()))
    }
}

type ErrorParts = (StatusCode, &'static str, String);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => core_error_parts(core),
            AppError::Database(err) => classify_sqlx_error(err),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn core_error_parts(core: &CoreError) -> ErrorParts {
    use CoreError::*;

    let (status, code) = match core {
        NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
        Unauthenticated(_) => (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED"),
        InsufficientReputation { .. } => (StatusCode::FORBIDDEN, "INSUFFICIENT_REPUTATION"),
        SelfVoteForbidden(_) => (StatusCode::FORBIDDEN, "SELF_VOTE_FORBIDDEN"),
        Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
        DuplicateOrderPosition { .. } => {
            (StatusCode::UNPROCESSABLE_ENTITY, "DUPLICATE_ORDER_POSITION")
        }
        AlreadyOnList { .. } => (StatusCode::CONFLICT, "ALREADY_ON_LIST"),
    };

    // User-facing messages go out without the `Display` prefix.
    let message = match core {
        NotFound { entity, id } => format!("{entity} with id {id} not found"),
        Validation(msg) | Conflict(msg) | Unauthenticated(msg) | SelfVoteForbidden(msg)
        | Forbidden(msg) => msg.clone(),
        InsufficientReputation { message, .. } => message.clone(),
        DuplicateOrderPosition { .. } | AlreadyOnList { .. } => core.to_string(),
    };

    (status, code, message)
}

fn internal_error() -> ErrorParts {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

/// Map a sqlx error to a response.
///
/// `RowNotFound` is 404 and a unique violation on a `uq_*` constraint is 409.
/// Anything else is logged and reported as a bare 500.
fn classify_sqlx_error(err: &sqlx::Error) -> ErrorParts {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            match db_err.constraint() {
                Some(constraint) if constraint.starts_with("uq_") => (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    format!("Duplicate value violates unique constraint: {constraint}"),
                ),
                _ => {
                    tracing::error!(error = %db_err, "Unexpected unique violation");
                    internal_error()
                }
            }
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal_error()
        }
    }
}
