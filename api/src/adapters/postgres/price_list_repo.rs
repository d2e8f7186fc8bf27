//! PostgreSQL adapter for PriceListRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::{audit_from_columns, now, write_error};
use crate::domain::entities::{LanguageId, PriceList, PriceListFields, PriceListId, UserId};
use crate::domain::ports::PriceListRepository;
use crate::entity::price_lists;
use crate::error::DomainError;

pub struct PostgresPriceListRepository {
    db: DatabaseConnection,
}

impl PostgresPriceListRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn apply_fields(model: &mut price_lists::ActiveModel, fields: &PriceListFields) {
    model.source_language_id = Set(fields.source_language_id.0);
    model.target_language_id = Set(fields.target_language_id.0);
    model.char_0_100 = Set(fields.char_0_100);
    model.char_100_150 = Set(fields.char_100_150);
    model.char_150_200 = Set(fields.char_150_200);
    model.char_200_500 = Set(fields.char_200_500);
    model.char_500_more = Set(fields.char_500_more);
}

#[async_trait]
impl PriceListRepository for PostgresPriceListRepository {
    async fn find_by_id(&self, id: PriceListId) -> Result<Option<PriceList>, DomainError> {
        let result = price_lists::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_all(&self, active: Option<bool>) -> Result<Vec<PriceList>, DomainError> {
        let mut query = price_lists::Entity::find();
        if let Some(active) = active {
            query = query.filter(price_lists::Column::Active.eq(active));
        }

        let results = query
            .order_by_asc(price_lists::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn create(
        &self,
        fields: &PriceListFields,
        actor: UserId,
    ) -> Result<PriceList, DomainError> {
        let mut model = price_lists::ActiveModel {
            active: Set(true),
            created_by: Set(actor.0),
            created_at: Set(now()),
            ..Default::default()
        };
        apply_fields(&mut model, fields);

        let result = model.insert(&self.db).await.map_err(write_error)?;

        Ok(result.into())
    }

    async fn update(
        &self,
        id: PriceListId,
        fields: &PriceListFields,
        actor: UserId,
    ) -> Result<PriceList, DomainError> {
        let mut model = price_lists::ActiveModel {
            id: Set(id.0),
            updated_by: Set(Some(actor.0)),
            updated_at: Set(Some(now())),
            ..Default::default()
        };
        apply_fields(&mut model, fields);

        let result = model.update(&self.db).await.map_err(write_error)?;

        Ok(result.into())
    }

    async fn set_active(
        &self,
        id: PriceListId,
        active: bool,
        actor: UserId,
    ) -> Result<PriceList, DomainError> {
        let result = price_lists::ActiveModel {
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

impl From<price_lists::Model> for PriceList {
    fn from(model: price_lists::Model) -> Self {
        PriceList {
            id: PriceListId(model.id),
            fields: PriceListFields {
                source_language_id: LanguageId(model.source_language_id),
                target_language_id: LanguageId(model.target_language_id),
                char_0_100: model.char_0_100,
                char_100_150: model.char_100_150,
                char_150_200: model.char_150_200,
                char_200_500: model.char_200_500,
                char_500_more: model.char_500_more,
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
