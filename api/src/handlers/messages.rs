//! Message handlers
//!
//! The read and delete operations are plain GETs keyed by `messageId`.

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::auth::Actor;
use crate::domain::entities::{Message, MessageId, MessageQuery, NewMessage, UserId};
use crate::domain::ports::Repositories;
use crate::error::{AppError, ServiceResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    pub user_id: UserId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageIdQuery {
    pub message_id: MessageId,
}

pub async fn add_message<R: Repositories>(
    State(state): State<AppState<R>>,
    Extension(Actor(actor)): Extension<Actor>,
    Json(message): Json<NewMessage>,
) -> Result<ServiceResult<Message>, AppError> {
    let message = state.message_service.add(message, actor).await?;
    tracing::debug!(message_id = %message.id, to = %message.to_user_id, "Message sent");
    Ok(ServiceResult::success(message))
}

/// GET /api/commonapi/getIncomingMessagesByUser?userId=
pub async fn get_incoming_messages<R: Repositories>(
    State(state): State<AppState<R>>,
    Query(query): Query<UserQuery>,
) -> Result<ServiceResult<Vec<Message>>, AppError> {
    let messages = state.message_service.incoming(query.user_id).await?;
    Ok(ServiceResult::success(messages))
}

/// GET /api/commonapi/getSentMessagesByUser?userId=
pub async fn get_sent_messages<R: Repositories>(
    State(state): State<AppState<R>>,
    Query(query): Query<UserQuery>,
) -> Result<ServiceResult<Vec<Message>>, AppError> {
    let messages = state.message_service.sent(query.user_id).await?;
    Ok(ServiceResult::success(messages))
}

pub async fn get_message<R: Repositories>(
    State(state): State<AppState<R>>,
    Query(query): Query<MessageIdQuery>,
) -> Result<ServiceResult<Message>, AppError> {
    let message = state.message_service.get(query.message_id).await?;
    Ok(ServiceResult::success(message))
}

/// POST /api/commonapi/getMessageByQuery
pub async fn get_messages_by_query<R: Repositories>(
    State(state): State<AppState<R>>,
    Json(query): Json<MessageQuery>,
) -> Result<ServiceResult<Vec<Message>>, AppError> {
    let messages = state.message_service.search(query).await?;
    Ok(ServiceResult::success(messages))
}

/// GET /api/commonapi/updateMessageForReadDate?messageId=
pub async fn mark_message_read<R: Repositories>(
    State(state): State<AppState<R>>,
    Query(query): Query<MessageIdQuery>,
) -> Result<ServiceResult<Message>, AppError> {
    let message = state.message_service.mark_read(query.message_id).await?;
    Ok(ServiceResult::success(message))
}

pub async fn delete_sent_message<R: Repositories>(
    State(state): State<AppState<R>>,
    Query(query): Query<MessageIdQuery>,
) -> Result<ServiceResult<Message>, AppError> {
    let message = state.message_service.delete_sent(query.message_id).await?;
    Ok(ServiceResult::success(message))
}

pub async fn delete_incoming_message<R: Repositories>(
    State(state): State<AppState<R>>,
    Query(query): Query<MessageIdQuery>,
) -> Result<ServiceResult<Message>, AppError> {
    let message = state.message_service.delete_incoming(query.message_id).await?;
    Ok(ServiceResult::success(message))
}
