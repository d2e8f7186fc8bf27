//! Message service
//!
//! Deleting only hides a message from the deleting party. The row is purged
//! once sender and recipient have both deleted it.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::entities::{Message, MessageId, MessageQuery, NewMessage, UserId};
use crate::domain::ports::MessageRepository;
use crate::error::AppError;

pub struct MessageService<MR>
where
    MR: MessageRepository,
{
    messages: Arc<MR>,
}

impl<MR> MessageService<MR>
where
    MR: MessageRepository,
{
    pub fn new(messages: Arc<MR>) -> Self {
        Self { messages }
    }

    pub async fn add(&self, message: NewMessage, actor: UserId) -> Result<Message, AppError> {
        if message.title.trim().is_empty() {
            return Err(AppError::BadRequest("message title is empty".to_string()));
        }
        Ok(self.messages.create(&message, actor).await?)
    }

    pub async fn incoming(&self, user_id: UserId) -> Result<Vec<Message>, AppError> {
        Ok(self.messages.find_incoming(user_id).await?)
    }

    pub async fn sent(&self, user_id: UserId) -> Result<Vec<Message>, AppError> {
        Ok(self.messages.find_sent(user_id).await?)
    }

    pub async fn get(&self, id: MessageId) -> Result<Message, AppError> {
        self.messages
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("message {}", id)))
    }

    pub async fn search(&self, query: MessageQuery) -> Result<Vec<Message>, AppError> {
        Ok(self.messages.search(&query).await?)
    }

    /// Stamps the read date on first read; later reads leave it unchanged
    pub async fn mark_read(&self, id: MessageId) -> Result<Message, AppError> {
        let message = self.get(id).await?;
        if message.read_date.is_some() {
            return Ok(message);
        }
        Ok(self.messages.set_read_date(id, Utc::now()).await?)
    }

    /// Hide from the sender's outbox
    pub async fn delete_sent(&self, id: MessageId) -> Result<Message, AppError> {
        let message = self.messages.hide_from_sender(id).await?;
        self.purge_if_hidden(message).await
    }

    /// Hide from the recipient's inbox
    pub async fn delete_incoming(&self, id: MessageId) -> Result<Message, AppError> {
        let message = self.messages.hide_from_recipient(id).await?;
        self.purge_if_hidden(message).await
    }

    async fn purge_if_hidden(&self, message: Message) -> Result<Message, AppError> {
        if message.is_deleted_by_both() && self.messages.purge_if_hidden(message.id).await? {
            tracing::debug!(message_id = %message.id, "Message purged");
        }
        Ok(message)
    }
}
