//! Login handlers

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::domain::entities::User;
use crate::domain::ports::Repositories;
use crate::error::{AppError, ServiceResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub email: String,
    pub old_password: String,
    pub new_password: String,
}

/// POST /api/commonapi/login
///
/// Verifies credentials. Each failure counts towards the lockout threshold.
pub async fn login<R: Repositories>(
    State(state): State<AppState<R>>,
    Json(request): Json<LoginRequest>,
) -> Result<ServiceResult<User>, AppError> {
    let user = state
        .auth_service
        .login(request.email.trim(), &request.password)
        .await?;

    Ok(ServiceResult::success(user))
}

/// POST /api/commonapi/changePassword
///
/// Returns the updated user. A wrong current password counts as a failed login.
pub async fn change_password<R: Repositories>(
    State(state): State<AppState<R>>,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<ServiceResult<User>, AppError> {
    let user = state
        .auth_service
        .change_password(
            request.email.trim(),
            &request.old_password,
            &request.new_password,
        )
        .await?;

    Ok(ServiceResult::success(user))
}
