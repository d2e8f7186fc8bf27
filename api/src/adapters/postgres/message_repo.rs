//! PostgreSQL adapter for MessageRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use super::{now, write_error};
use crate::domain::entities::{Message, MessageId, MessageQuery, NewMessage, UserId};
use crate::domain::ports::MessageRepository;
use crate::entity::messages;
use crate::error::DomainError;

pub struct PostgresMessageRepository {
    db: DatabaseConnection,
}

impl PostgresMessageRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Update one visibility column; the other party's flag is never written
    async fn clear_flag(
        &self,
        id: MessageId,
        column: messages::Column,
    ) -> Result<Message, DomainError> {
        let updated = messages::Entity::update_many()
            .col_expr(column, Expr::value(false))
            .filter(messages::Column::Id.eq(id.0))
            .exec_with_returning(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        updated
            .into_iter()
            .next()
            .map(Message::from)
            .ok_or_else(|| DomainError::NotFound(format!("Message {} not found", id)))
    }
}

#[async_trait]
impl MessageRepository for PostgresMessageRepository {
    async fn create(&self, message: &NewMessage, actor: UserId) -> Result<Message, DomainError> {
        let result = messages::ActiveModel {
            from_user_id: Set(message.from_user_id.0),
            to_user_id: Set(message.to_user_id.0),
            title: Set(message.title.clone()),
            content: Set(message.content.clone()),
            read_date: Set(None),
            from_status: Set(true),
            to_status: Set(true),
            active: Set(true),
            created_by: Set(actor.0),
            created_at: Set(now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(write_error)?;

        Ok(result.into())
    }

    async fn find_by_id(&self, id: MessageId) -> Result<Option<Message>, DomainError> {
        let result = messages::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_incoming(&self, user_id: UserId) -> Result<Vec<Message>, DomainError> {
        let results = messages::Entity::find()
            .filter(messages::Column::ToUserId.eq(user_id.0))
            .filter(messages::Column::ToStatus.eq(true))
            .order_by_desc(messages::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn find_sent(&self, user_id: UserId) -> Result<Vec<Message>, DomainError> {
        let results = messages::Entity::find()
            .filter(messages::Column::FromUserId.eq(user_id.0))
            .filter(messages::Column::FromStatus.eq(true))
            .order_by_desc(messages::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn search(&self, query: &MessageQuery) -> Result<Vec<Message>, DomainError> {
        let mut select = messages::Entity::find();
        if let Some(from) = query.from_user_id {
            select = select.filter(messages::Column::FromUserId.eq(from.0));
        }
        if let Some(to) = query.to_user_id {
            select = select.filter(messages::Column::ToUserId.eq(to.0));
        }
        if query.unread_only {
            select = select.filter(messages::Column::ReadDate.is_null());
        }

        let results = select
            .order_by_desc(messages::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn set_read_date(
        &self,
        id: MessageId,
        read_at: DateTime<Utc>,
    ) -> Result<Message, DomainError> {
        let result = messages::ActiveModel {
            id: Set(id.0),
            read_date: Set(Some(read_at.fixed_offset())),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(write_error)?;

        Ok(result.into())
    }

    async fn hide_from_sender(&self, id: MessageId) -> Result<Message, DomainError> {
        self.clear_flag(id, messages::Column::FromStatus).await
    }

    async fn hide_from_recipient(&self, id: MessageId) -> Result<Message, DomainError> {
        self.clear_flag(id, messages::Column::ToStatus).await
    }

    async fn purge_if_hidden(&self, id: MessageId) -> Result<bool, DomainError> {
        let result = messages::Entity::delete_many()
            .filter(messages::Column::Id.eq(id.0))
            .filter(messages::Column::FromStatus.eq(false))
            .filter(messages::Column::ToStatus.eq(false))
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }
}

impl From<messages::Model> for Message {
    fn from(model: messages::Model) -> Self {
        Message {
            id: MessageId(model.id),
            from_user_id: UserId(model.from_user_id),
            to_user_id: UserId(model.to_user_id),
            title: model.title,
            content: model.content,
            read_date: model.read_date.map(|t| t.with_timezone(&Utc)),
            from_status: model.from_status,
            to_status: model.to_status,
            created_by: UserId(model.created_by),
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}
