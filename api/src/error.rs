//! Unified error types for the LinguaDesk API
//!
//! This module defines error types for each layer:
//! - `DomainError`: Persistence and core errors raised by repositories
//! - `AppError`: Application layer errors (wraps domain errors for HTTP responses)
//!
//! Every response, success or failure, uses the `ServiceResult` envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::domain::entities::{OrderId, RoleGroup};

/// Domain layer errors - raised by repositories
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Entity not inserted: {0}")]
    NotInserted(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Application layer errors - used by services and HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("There is no related data: {0}")]
    NotFound(String),

    #[error("There is no order with id {0}")]
    OrderNotFound(OrderId),

    #[error("No {group} matches the translation quality of order {order_id}")]
    NoMatchingUsers { group: RoleGroup, order_id: OrderId },

    #[error("Passive user {0}")]
    PassiveUser(String),

    #[error("User locked out for password retry count")]
    UserLockedOut,

    #[error("Wrong password for user email {email}")]
    WrongPassword { email: String, remaining_attempts: i32 },

    #[error("Email {0} is already used")]
    EmailIsUsed(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Outcome class carried in every envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ServiceResultType {
    Success,
    Fail,
    Warning,
    /// Reserved wire value; never produced by this server
    #[allow(dead_code)]
    NotKnown,
}

/// Granular failure reason carried in the envelope body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExceptionCode {
    NoRelatedData,
    PassiveUser,
    UserLockedOut,
    WrongPasswordForUser,
    UnableToInsert,
    ObjectReferenceError,
    EmailIsUsed,
    NoOrderWithSpecifiedId,
    NoTranslatorFound,
    NoEditorFound,
    NoProofReaderFound,
    InvalidRequest,
    Unauthorized,
}

/// Response envelope: `{serviceResultType, data, message, exceptionCode}`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceResult<T> {
    pub service_result_type: ServiceResultType,
    pub data: Option<T>,
    pub message: Option<String>,
    pub exception_code: Option<ExceptionCode>,
}

impl<T> ServiceResult<T> {
    pub fn success(data: T) -> Self {
        Self {
            service_result_type: ServiceResultType::Success,
            data: Some(data),
            message: None,
            exception_code: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ServiceResult<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

impl AppError {
    pub fn exception_code(&self) -> ExceptionCode {
        match self {
            AppError::Domain(DomainError::NotFound(_)) | AppError::NotFound(_) => {
                ExceptionCode::NoRelatedData
            }
            AppError::Domain(DomainError::NotInserted(_)) => ExceptionCode::UnableToInsert,
            AppError::Domain(DomainError::Database(_))
            | AppError::Domain(DomainError::Internal(_))
            | AppError::Internal(_) => ExceptionCode::ObjectReferenceError,
            AppError::OrderNotFound(_) => ExceptionCode::NoOrderWithSpecifiedId,
            AppError::NoMatchingUsers { group, .. } => match group {
                RoleGroup::Translators => ExceptionCode::NoTranslatorFound,
                RoleGroup::Editors => ExceptionCode::NoEditorFound,
                RoleGroup::ProofReaders => ExceptionCode::NoProofReaderFound,
            },
            AppError::PassiveUser(_) => ExceptionCode::PassiveUser,
            AppError::UserLockedOut => ExceptionCode::UserLockedOut,
            AppError::WrongPassword { .. } => ExceptionCode::WrongPasswordForUser,
            AppError::EmailIsUsed(_) => ExceptionCode::EmailIsUsed,
            AppError::BadRequest(_) => ExceptionCode::InvalidRequest,
            AppError::Unauthorized => ExceptionCode::Unauthorized,
        }
    }

    pub fn result_type(&self) -> ServiceResultType {
        match self {
            AppError::EmailIsUsed(_) => ServiceResultType::Warning,
            _ => ServiceResultType::Fail,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.exception_code() {
            ExceptionCode::NoRelatedData
            | ExceptionCode::NoOrderWithSpecifiedId
            | ExceptionCode::NoTranslatorFound
            | ExceptionCode::NoEditorFound
            | ExceptionCode::NoProofReaderFound => StatusCode::NOT_FOUND,
            ExceptionCode::InvalidRequest => StatusCode::BAD_REQUEST,
            ExceptionCode::WrongPasswordForUser | ExceptionCode::Unauthorized => {
                StatusCode::UNAUTHORIZED
            }
            ExceptionCode::PassiveUser | ExceptionCode::UserLockedOut => StatusCode::FORBIDDEN,
            ExceptionCode::EmailIsUsed => StatusCode::CONFLICT,
            ExceptionCode::UnableToInsert | ExceptionCode::ObjectReferenceError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.exception_code();

        let message = if status.is_server_error() {
            tracing::error!(exception_code = ?code, "{}", self);
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let data = match &self {
            AppError::WrongPassword {
                remaining_attempts, ..
            } => Some(json!({ "remainingAttempts": remaining_attempts })),
            _ => None,
        };

        let body = ServiceResult {
            service_result_type: self.result_type(),
            data,
            message: Some(message),
            exception_code: Some(code),
        };

        (status, Json(body)).into_response()
    }
}
