//! PostgreSQL adapter for LanguageRepository
//!
//! Covers languages and the source/target pair join rows.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};

use super::{audit_from_columns, now, write_error};
use crate::domain::entities::{
    Language, LanguageFields, LanguageId, LanguagePair, SourceTargetLanguage,
    SourceTargetLanguageId, UserId,
};
use crate::domain::ports::LanguageRepository;
use crate::entity::{languages, source_target_languages};
use crate::error::DomainError;

pub struct PostgresLanguageRepository {
    db: DatabaseConnection,
}

impl PostgresLanguageRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LanguageRepository for PostgresLanguageRepository {
    async fn find_by_id(&self, id: LanguageId) -> Result<Option<Language>, DomainError> {
        let result = languages::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_all(&self, active: Option<bool>) -> Result<Vec<Language>, DomainError> {
        let mut query = languages::Entity::find();
        if let Some(active) = active {
            query = query.filter(languages::Column::Active.eq(active));
        }

        let results = query
            .order_by_asc(languages::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn create(
        &self,
        fields: &LanguageFields,
        actor: UserId,
    ) -> Result<Language, DomainError> {
        let result = languages::ActiveModel {
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
        id: LanguageId,
        fields: &LanguageFields,
        actor: UserId,
    ) -> Result<Language, DomainError> {
        let result = languages::ActiveModel {
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
        id: LanguageId,
        active: bool,
        actor: UserId,
    ) -> Result<Language, DomainError> {
        let result = languages::ActiveModel {
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

    async fn find_pairs_by_source(
        &self,
        source: LanguageId,
    ) -> Result<Vec<SourceTargetLanguage>, DomainError> {
        let results = source_target_languages::Entity::find()
            .filter(source_target_languages::Column::SourceLanguageId.eq(source.0))
            .order_by_asc(source_target_languages::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn create_pair(
        &self,
        pair: &LanguagePair,
        actor: UserId,
    ) -> Result<SourceTargetLanguage, DomainError> {
        let result = source_target_languages::ActiveModel {
            source_language_id: Set(pair.source_language_id.0),
            target_language_id: Set(pair.target_language_id.0),
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

    async fn delete_pair(
        &self,
        pair: &LanguagePair,
    ) -> Result<Option<SourceTargetLanguage>, DomainError> {
        let found = source_target_languages::Entity::find()
            .filter(source_target_languages::Column::SourceLanguageId.eq(pair.source_language_id.0))
            .filter(source_target_languages::Column::TargetLanguageId.eq(pair.target_language_id.0))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let Some(model) = found else {
            return Ok(None);
        };

        let removed: SourceTargetLanguage = model.clone().into();
        model
            .delete(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(Some(removed))
    }
}

impl From<languages::Model> for Language {
    fn from(model: languages::Model) -> Self {
        Language {
            id: LanguageId(model.id),
            fields: LanguageFields { name: model.name },
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

impl From<source_target_languages::Model> for SourceTargetLanguage {
    fn from(model: source_target_languages::Model) -> Self {
        SourceTargetLanguage {
            id: SourceTargetLanguageId(model.id),
            pair: LanguagePair {
                source_language_id: LanguageId(model.source_language_id),
                target_language_id: LanguageId(model.target_language_id),
            },
            active: model.active,
            created_by: UserId(model.created_by),
        }
    }
}
