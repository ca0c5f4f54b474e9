use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation failed")]
    Validation(HashMap<String, Vec<String>>),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Unauthorized(msg) => {
                warn!("Unauthorized request: {}", msg);
                (StatusCode::UNAUTHORIZED, json!({ "error": msg }))
            }
            ApiError::Forbidden(msg) => {
                warn!("Forbidden request: {}", msg);
                (StatusCode::FORBIDDEN, json!({ "error": msg }))
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, json!({ "error": msg })),
            ApiError::Validation(fields) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "validation failed", "fields": fields }),
            ),
            ApiError::DatabaseError(msg) => {
                error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "internal server error" }),
                )
            }
            ApiError::InternalError(msg) => {
                error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => ApiError::NotFound("record not found".to_string()),
            sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
                // unique_violation
                Some("23505") => ApiError::Conflict("record already exists".to_string()),
                // foreign_key_violation
                Some("23503") => {
                    ApiError::BadRequest("referenced record does not exist".to_string())
                }
                _ => ApiError::DatabaseError(err.to_string()),
            },
            _ => ApiError::DatabaseError(err.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let fields = errors
            .field_errors()
            .iter()
            .map(|(field, errs)| {
                let messages = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                (field.to_string(), messages)
            })
            .collect();
        ApiError::Validation(fields)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::InternalError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;

    // Minimal driver error carrying a SQLSTATE code, so the code-based
    // mappings can be exercised without a database.
    #[derive(Debug)]
    struct SqlStateError(&'static str);

    impl std::fmt::Display for SqlStateError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "constraint violation ({})", self.0)
        }
    }

    impl std::error::Error for SqlStateError {}

    impl sqlx::error::DatabaseError for SqlStateError {
        fn message(&self) -> &str {
            "constraint violation"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.0))
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> sqlx::error::ErrorKind {
            sqlx::error::ErrorKind::Other
        }
    }

    fn db_error(code: &'static str) -> sqlx::Error {
        sqlx::Error::Database(Box::new(SqlStateError(code)))
    }

    #[test]
    fn row_not_found_maps_to_not_found() {
        let err = ApiError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn unique_violation_maps_to_conflict() {
        let err = ApiError::from(db_error("23505"));
        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[test]
    fn foreign_key_violation_maps_to_bad_request() {
        let err = ApiError::from(db_error("23503"));
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[test]
    fn unrecognized_sqlstate_maps_to_database_error() {
        let err = ApiError::from(db_error("40001"));
        assert!(matches!(err, ApiError::DatabaseError(_)));
    }

    #[test]
    fn other_sqlx_errors_map_to_database_error() {
        let err = ApiError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, ApiError::DatabaseError(_)));
    }

    #[test]
    fn validation_errors_collect_per_field() {
        use validator::Validate;

        #[derive(Validate)]
        struct Probe {
            #[validate(length(min = 8, message = "must be at least 8 characters"))]
            password: String,
            #[validate(email(message = "must be a valid email"))]
            email: String,
        }

        let probe = Probe {
            password: "short".to_string(),
            email: "not-an-email".to_string(),
        };
        let err = ApiError::from(probe.validate().unwrap_err());
        match err {
            ApiError::Validation(fields) => {
                assert!(fields.contains_key("password"));
                assert!(fields.contains_key("email"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
