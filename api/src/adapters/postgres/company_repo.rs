//! PostgreSQL adapter for CompanyRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::{audit_from_columns, now, write_error};
use crate::domain::entities::{Company, CompanyFields, CompanyId, UserId};
use crate::domain::ports::CompanyRepository;
use crate::entity::companies;
use crate::error::DomainError;

/// PostgreSQL implementation of CompanyRepository
pub struct PostgresCompanyRepository {
    db: DatabaseConnection,
}

impl PostgresCompanyRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Copy the editable columns onto an active model
fn apply_fields(model: &mut companies::ActiveModel, fields: &CompanyFields) {
    model.name = Set(fields.name.clone());
    model.tax_number = Set(fields.tax_number.clone());
    model.tax_office = Set(fields.tax_office.clone());
    model.phone = Set(fields.phone.clone());
    model.extension_number = Set(fields.extension_number.clone());
    model.accounting_email = Set(fields.accounting_email.clone());
    model.address = Set(fields.address.clone());
    model.authorized_email = Set(fields.authorized_email.clone());
    model.authorized_full_name = Set(fields.authorized_full_name.clone());
    model.authorized_mobile_phone = Set(fields.authorized_mobile_phone.clone());
    model.is_contract_price = Set(fields.is_contract_price);
    model.is_using_po = Set(fields.is_using_po);
}

#[async_trait]
impl CompanyRepository for PostgresCompanyRepository {
    async fn find_by_id(&self, id: CompanyId) -> Result<Option<Company>, DomainError> {
        let result = companies::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_all(&self, active: Option<bool>) -> Result<Vec<Company>, DomainError> {
        let mut query = companies::Entity::find();
        if let Some(active) = active {
            query = query.filter(companies::Column::Active.eq(active));
        }

        let results = query
            .order_by_asc(companies::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn create(&self, fields: &CompanyFields, actor: UserId) -> Result<Company, DomainError> {
        let mut model = companies::ActiveModel {
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
        id: CompanyId,
        fields: &CompanyFields,
        actor: UserId,
    ) -> Result<Company, DomainError> {
        let mut model = companies::ActiveModel {
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
        id: CompanyId,
        active: bool,
        actor: UserId,
    ) -> Result<Company, DomainError> {
        let result = companies::ActiveModel {
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

impl From<companies::Model> for Company {
    fn from(model: companies::Model) -> Self {
        Company {
            id: CompanyId(model.id),
            fields: CompanyFields {
                name: model.name,
                tax_number: model.tax_number,
                tax_office: model.tax_office,
                phone: model.phone,
                extension_number: model.extension_number,
                accounting_email: model.accounting_email,
                address: model.address,
                authorized_email: model.authorized_email,
                authorized_full_name: model.authorized_full_name,
                authorized_mobile_phone: model.authorized_mobile_phone,
                is_contract_price: model.is_contract_price,
                is_using_po: model.is_using_po,
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
