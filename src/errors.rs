use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

/// Message returned to clients for every 5xx. The real cause is only logged.
const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Validation failed")]
    ValidationFailed(Vec<FieldError>),

    #[error("Email already exists")]
    DuplicateEmail,

    #[error("{0}")]
    AlreadyExists(String),

    #[error("{0}")]
    MalformedId(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("{0}")]
    Unauthenticated(String),

    #[error("Invalid or expired token")]
    TokenInvalid,

    #[error("{0}")]
    NotFound(String),

    #[error("Server misconfiguration: {0}")]
    ServerMisconfiguration(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::ValidationFailed(vec![FieldError::new(field, message)])
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct ValidationErrorResponse<'a> {
    pub errors: &'a [FieldError],
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationFailed(_)
            | AppError::DuplicateEmail
            | AppError::AlreadyExists(_)
            | AppError::MalformedId(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials
            | AppError::Unauthenticated(_)
            | AppError::TokenInvalid => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ServerMisconfiguration(_)
            | AppError::DatabaseError(_)
            | AppError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        if let AppError::ValidationFailed(errors) = self {
            return HttpResponse::build(status).json(ValidationErrorResponse { errors });
        }

        let error = if status.is_server_error() {
            log::error!("{}", self);
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            self.to_string()
        };

        HttpResponse::build(status).json(ErrorResponse { error })
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for AppError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        AppError::Unexpected(format!("BSON serialization error: {}", err))
    }
}

impl From<mongodb::bson::de::Error> for AppError {
    fn from(err: mongodb::bson::de::Error) -> Self {
        AppError::Unexpected(format!("BSON deserialization error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        let mut errors: Vec<FieldError> = err
            .field_errors()
            .into_iter()
            .flat_map(|(field, field_errors)| {
                let field = field.to_string();
                field_errors.iter().map(move |e| {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value ({})", e.code));
                    FieldError::new(field.clone(), message)
                })
            })
            .collect();

        errors.sort_by(|a, b| a.field.cmp(&b.field));
        AppError::ValidationFailed(errors)
    }
}

pub type AppResult<T> = Result<T, AppError>;
