//! PostgreSQL adapter for ReferenceDataRepository

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use crate::domain::entities::{ReferenceItem, ReferenceItemId, ReferenceKind};
use crate::domain::ports::ReferenceDataRepository;
use crate::entity::reference_items;
use crate::error::DomainError;

pub struct PostgresReferenceDataRepository {
    db: DatabaseConnection,
}

impl PostgresReferenceDataRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReferenceDataRepository for PostgresReferenceDataRepository {
    async fn find_by_kind(
        &self,
        kind: ReferenceKind,
        parent_id: Option<ReferenceItemId>,
    ) -> Result<Vec<ReferenceItem>, DomainError> {
        let mut query = reference_items::Entity::find()
            .filter(reference_items::Column::Kind.eq(kind.as_str()))
            .filter(reference_items::Column::Active.eq(true));
        if let Some(parent_id) = parent_id {
            query = query.filter(reference_items::Column::ParentId.eq(parent_id.0));
        }

        let results = query
            .order_by_asc(reference_items::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }
}

impl From<reference_items::Model> for ReferenceItem {
    fn from(model: reference_items::Model) -> Self {
        ReferenceItem {
            id: ReferenceItemId(model.id),
            name: model.name,
            code: model.code,
            parent_id: model.parent_id.map(ReferenceItemId),
        }
    }
}
