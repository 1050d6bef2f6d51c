use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sea_orm::DbErr),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Member already exists: {0}")]
    DuplicateMember(String),

    #[error("Need more stock for {item}: requested {requested}, available {available}")]
    NotEnoughStock {
        item: String,
        requested: i32,
        available: i32,
    },

    #[error("Order {0} is already delivered and cannot be cancelled")]
    OrderNotCancelable(i64),

    #[error("Config error: {0}")]
    ConfigError(String),
}

impl AppError {
    fn status_and_code(&self) -> (actix_web::http::StatusCode, &'static str) {
        use actix_web::http::StatusCode;
        match self {
            AppError::ValidationError(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::DuplicateMember(_) => (StatusCode::CONFLICT, "DUPLICATE_MEMBER"),
            AppError::NotEnoughStock { .. } => (StatusCode::CONFLICT, "NOT_ENOUGH_STOCK"),
            AppError::OrderNotCancelable(_) => (StatusCode::CONFLICT, "ORDER_NOT_CANCELABLE"),
            AppError::DatabaseError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
            AppError::ConfigError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        self.status_and_code().0
    }

    fn error_response(&self) -> HttpResponse {
        let (status_code, error_code) = self.status_and_code();
        let message = match self {
            AppError::DatabaseError(err) => {
                log::error!("Database error: {err}");
                "Database error".to_string()
            }
            AppError::ConfigError(_) => {
                log::error!("{self}");
                "Internal server error".to_string()
            }
            AppError::ValidationError(msg) => {
                log::warn!("Validation error: {msg}");
                msg.clone()
            }
            AppError::NotFound(msg) => msg.clone(),
            _ => {
                log::warn!("{self}");
                self.to_string()
            }
        };

        HttpResponse::build(status_code).json(json!({
            "success": false,
            "error": {
                "code": error_code,
                "message": message
            }
        }))
    }
}
