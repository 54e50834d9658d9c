use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::{Map, Value, json};
use tracing::error;
use validator::ValidationErrors;

/// Application-level error type shared by the store, services and handlers.
///
/// Implements [`ResponseError`] so handlers can return it with `?` and get a
/// consistent JSON body of the form `{ "error", "code", "fields"? }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// No employee row carries the requested id.
    #[error("Employee with id {0} not found")]
    NotFound(i32),

    /// Form input failed validation; carries the per-field messages.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// A request parameter could not be interpreted.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An insert collided with an existing primary key.
    #[error("Employee id {0} already exists")]
    UniqueConstraintViolation(i32),

    /// The uploaded image could not be written to the asset store.
    #[error("Failed to persist uploaded asset: {0}")]
    AssetPersistence(#[source] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::UniqueConstraintViolation(_) => "UNIQUE_CONSTRAINT_VIOLATION",
            AppError::AssetPersistence(_) => "ASSET_PERSISTENCE_FAILURE",
            AppError::Database(_) => "INTERNAL_ERROR",
        }
    }
}

/// Flatten validator output into `{ field: [message, ...] }`.
pub fn field_messages(errors: &ValidationErrors) -> Map<String, Value> {
    let mut fields = Map::new();
    for (field, errs) in errors.field_errors() {
        let messages = errs
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .map(Value::String)
            .collect::<Vec<_>>();
        fields.insert(field.to_string(), Value::Array(messages));
    }
    fields
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::UniqueConstraintViolation(_)
            | AppError::AssetPersistence(_)
            | AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::Validation(errors) => json!({
                "error": "Validation failed",
                "code": self.code(),
                "fields": field_messages(errors),
            }),
            AppError::Database(e) => {
                error!(error = %e, "Database error");
                json!({
                    "error": "Something went wrong, Contact with system admin",
                    "code": self.code(),
                })
            }
            AppError::AssetPersistence(e) => {
                error!(error = %e, "Asset persistence failed");
                json!({ "error": self.to_string(), "code": self.code() })
            }
            other => json!({ "error": other.to_string(), "code": other.code() }),
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}
