//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// A driver value that cannot be coerced into the requested column type.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("cannot convert column {column} from {found} to {expected}")]
pub struct ConversionError {
    pub column: String,
    pub expected: &'static str,
    pub found: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{message}")]
    BadRequest {
        entity: &'static str,
        key: &'static str,
        message: String,
    },
    #[error("{message}")]
    NotFound {
        entity: &'static str,
        key: &'static str,
        message: String,
    },
    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),
    #[error(transparent)]
    Conversion(#[from] ConversionError),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("driver: {0}")]
    Driver(String),
    #[error("insert into {0} returned no id")]
    MissingGeneratedId(&'static str),
}

impl AppError {
    pub fn bad_request(entity: &'static str, key: &'static str, message: impl Into<String>) -> Self {
        AppError::BadRequest {
            entity,
            key,
            message: message.into(),
        }
    }

    pub fn not_found(entity: &'static str, key: &'static str) -> Self {
        AppError::NotFound {
            entity,
            key,
            message: "Entity not found".into(),
        }
    }

    /// Machine-readable key rendered as `error.code`.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::BadRequest { key, .. } | AppError::NotFound { key, .. } => *key,
            AppError::UnsupportedMediaType(_) => "unsupported_media_type",
            AppError::Conversion(_) => "conversion_error",
            AppError::Db(_) => "database_error",
            AppError::Driver(_) | AppError::MissingGeneratedId(_) => "database_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::Conversion(_) | AppError::Db(_) | AppError::Driver(_) | AppError::MissingGeneratedId(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let details = match &self {
            AppError::BadRequest { entity, .. } | AppError::NotFound { entity, .. } if !entity.is_empty() => {
                Some(serde_json::json!({ "entityName": entity }))
            }
            _ => None,
        };
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code().to_string(),
                message: self.to_string(),
                details,
            },
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_and_statuses() {
        let e = AppError::bad_request("movies", "idexists", "A new movies cannot already have an ID");
        assert_eq!(e.status(), StatusCode::BAD_REQUEST);
        assert_eq!(e.code(), "idexists");

        let e = AppError::not_found("movies", "idnotfound");
        assert_eq!(e.status(), StatusCode::NOT_FOUND);
        assert_eq!(e.code(), "idnotfound");

        let e = AppError::from(ConversionError {
            column: "e_id".into(),
            expected: "bigint",
            found: "text \"x\"".into(),
        });
        assert_eq!(e.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(e.to_string(), "cannot convert column e_id from text \"x\" to bigint");
    }
}
