use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::response::{ApiResponse, Meta};

/// Classification tag attached to every logged error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    ValidationError,
    NotFound,
    AuthError,
    DatabaseError,
    CmsError,
    ApiError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::ValidationError => "VALIDATION_ERROR",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::AuthError => "AUTH_ERROR",
            ErrorKind::DatabaseError => "DATABASE_ERROR",
            ErrorKind::CmsError => "CMS_ERROR",
            ErrorKind::ApiError => "API_ERROR",
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid {field}: {message}")]
    Validation { field: &'static str, message: String },

    #[error("{resource} not found: {identifier}")]
    NotFound {
        resource: &'static str,
        identifier: String,
    },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    #[error("Database error")]
    Sqlx(#[from] sqlx::Error),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        AppError::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &'static str, identifier: impl Into<String>) -> Self {
        AppError::NotFound {
            resource,
            identifier: identifier.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation { .. } => ErrorKind::ValidationError,
            AppError::NotFound { .. } => ErrorKind::NotFound,
            AppError::Unauthorized(_) => ErrorKind::AuthError,
            AppError::Database(_) | AppError::Sqlx(_) => ErrorKind::DatabaseError,
            AppError::Internal(_) => ErrorKind::ApiError,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Database(_) | AppError::Sqlx(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            AppError::Validation { field, message } => {
                Some(serde_json::json!({ "field": field, "reason": message }))
            }
            AppError::NotFound {
                resource,
                identifier,
            } => Some(serde_json::json!({ "resource": resource, "identifier": identifier })),
            _ => None,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::validation("body", rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::validation("path", rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::validation("query", rejection.body_text())
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorData {
    pub error: String,
    pub code: ErrorKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let kind = self.kind();

        if status.is_server_error() {
            tracing::error!(kind = kind.as_str(), error = ?self, "request failed");
        } else {
            tracing::debug!(kind = kind.as_str(), error = %self, "request rejected");
        }

        let body = ApiResponse {
            message: self.to_string(),
            data: Some(ErrorData {
                error: self.to_string(),
                code: kind,
                details: self.details(),
            }),
            meta: Some(Meta::empty()),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
