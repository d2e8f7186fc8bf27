//! PostgreSQL adapter for CompanyTerminologyRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};

use super::{audit_from_columns, now, write_error};
use crate::domain::entities::{
    CompanyId, CompanyTerminology, CompanyTerminologyFields, CompanyTerminologyId, UserId,
};
use crate::domain::ports::CompanyTerminologyRepository;
use crate::entity::company_terminologies;
use crate::error::DomainError;

pub struct PostgresCompanyTerminologyRepository {
    db: DatabaseConnection,
}

impl PostgresCompanyTerminologyRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CompanyTerminologyRepository for PostgresCompanyTerminologyRepository {
    async fn find_by_id(
        &self,
        id: CompanyTerminologyId,
    ) -> Result<Option<CompanyTerminology>, DomainError> {
        let result = company_terminologies::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_all(
        &self,
        active: Option<bool>,
    ) -> Result<Vec<CompanyTerminology>, DomainError> {
        let mut query = company_terminologies::Entity::find();
        if let Some(active) = active {
            query = query.filter(company_terminologies::Column::Active.eq(active));
        }

        let results = query
            .order_by_asc(company_terminologies::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn create(
        &self,
        fields: &CompanyTerminologyFields,
        actor: UserId,
    ) -> Result<CompanyTerminology, DomainError> {
        let result = company_terminologies::ActiveModel {
            name: Set(fields.name.clone()),
            company_id: Set(fields.company_id.0),
            file_url: Set(fields.file_url.clone()),
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
        id: CompanyTerminologyId,
        fields: &CompanyTerminologyFields,
        actor: UserId,
    ) -> Result<CompanyTerminology, DomainError> {
        let result = company_terminologies::ActiveModel {
            id: Set(id.0),
            name: Set(fields.name.clone()),
            company_id: Set(fields.company_id.0),
            file_url: Set(fields.file_url.clone()),
            updated_by: Set(Some(actor.0)),
            updated_at: Set(Some(now())),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(write_error)?;

        Ok(result.into())
    }

    async fn delete(
        &self,
        id: CompanyTerminologyId,
    ) -> Result<Option<CompanyTerminology>, DomainError> {
        let found = company_terminologies::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let Some(model) = found else {
            return Ok(None);
        };

        let removed: CompanyTerminology = model.clone().into();
        model
            .delete(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(Some(removed))
    }
}

impl From<company_terminologies::Model> for CompanyTerminology {
    fn from(model: company_terminologies::Model) -> Self {
        CompanyTerminology {
            id: CompanyTerminologyId(model.id),
            fields: CompanyTerminologyFields {
                name: model.name,
                company_id: CompanyId(model.company_id),
                file_url: model.file_url,
            },
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
