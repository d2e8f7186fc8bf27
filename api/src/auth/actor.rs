//! Acting-user middleware
//!
//! Every write is stamped with the user performing it. The user is named by
//! the `X-Actor-Id` header; requests without the header act as the configured
//! default actor.

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};

use crate::domain::entities::UserId;
use crate::domain::ports::Repositories;
use crate::error::AppError;
use crate::AppState;

pub const ACTOR_HEADER: &str = "x-actor-id";

/// The user on whose behalf a request runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor(pub UserId);

/// Parse the actor header; a present but malformed value is rejected
fn extract_actor_id(request: &Request<Body>) -> Result<Option<UserId>, AppError> {
    let Some(value) = request.headers().get(ACTOR_HEADER) else {
        return Ok(None);
    };

    value
        .to_str()
        .ok()
        .and_then(|v| v.trim().parse::<i32>().ok())
        .map(|id| Some(UserId(id)))
        .ok_or(AppError::Unauthorized)
}

/// Injects an [`Actor`] into request extensions.
///
/// A header naming an unknown or passive user is rejected with 401.
pub async fn actor_middleware<R: Repositories>(
    State(state): State<AppState<R>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let actor = match extract_actor_id(&request)? {
        Some(id) => {
            let user = state.user_service.find_active(id).await?;
            match user {
                Some(user) => user.id,
                None => {
                    tracing::warn!(actor_id = %id, "Rejected request from unknown or passive actor");
                    return Err(AppError::Unauthorized);
                }
            }
        }
        None => state.default_actor,
    };

    request.extensions_mut().insert(Actor(actor));
    Ok(next.run(request).await)
}
