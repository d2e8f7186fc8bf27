//! PostgreSQL adapter for TerminologyRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::{audit_from_columns, now, write_error};
use crate::domain::entities::{Terminology, TerminologyFields, TerminologyId, UserId};
use crate::domain::ports::TerminologyRepository;
use crate::entity::terminologies;
use crate::error::DomainError;

pub struct PostgresTerminologyRepository {
    db: DatabaseConnection,
}

impl PostgresTerminologyRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TerminologyRepository for PostgresTerminologyRepository {
    async fn find_by_id(&self, id: TerminologyId) -> Result<Option<Terminology>, DomainError> {
        let result = terminologies::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_all(&self, active: Option<bool>) -> Result<Vec<Terminology>, DomainError> {
        let mut query = terminologies::Entity::find();
        if let Some(active) = active {
            query = query.filter(terminologies::Column::Active.eq(active));
        }

        let results = query
            .order_by_asc(terminologies::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn create(
        &self,
        fields: &TerminologyFields,
        actor: UserId,
    ) -> Result<Terminology, DomainError> {
        let result = terminologies::ActiveModel {
            name: Set(fields.name.clone()),
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

    async fn update(
        &self,
        id: TerminologyId,
        fields: &TerminologyFields,
        actor: UserId,
    ) -> Result<Terminology, DomainError> {
        let result = terminologies::ActiveModel {
            id: Set(id.0),
            name: Set(fields.name.clone()),
            updated_by: Set(Some(actor.0)),
            updated_at: Set(Some(now())),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(write_error)?;

        Ok(result.into())
    }

    async fn set_active(
        &self,
        id: TerminologyId,
        active: bool,
        actor: UserId,
    ) -> Result<Terminology, DomainError> {
        let result = terminologies::ActiveModel {
            id: Set(id.0),
            active: Set(active),
            updated_by: Set(Some(actor.0)),
            updated_at: Set(Some(now())),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(write_error)?;

        Ok(result.into())
    }
}

impl From<terminologies::Model> for Terminology {
    fn from(model: terminologies::Model) -> Self {
        Terminology {
            id: TerminologyId(model.id),
            fields: TerminologyFields { name: model.name },
            audit: audit_from_columns(
                model.active,
                model.created_by,
                model.created_at,
                model.updated_by,
                model.updated_at,
            ),
        }
    }
}
