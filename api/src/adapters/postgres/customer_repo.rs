//! PostgreSQL adapter for CustomerRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::{audit_from_columns, now, write_error};
use crate::domain::entities::{
    CompanyId, Customer, CustomerFields, CustomerId, MembershipType, UserId,
};
use crate::domain::ports::CustomerRepository;
use crate::entity::customers;
use crate::error::DomainError;

pub struct PostgresCustomerRepository {
    db: DatabaseConnection,
}

impl PostgresCustomerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn apply_fields(model: &mut customers::ActiveModel, fields: &CustomerFields) {
    model.name = Set(fields.name.clone());
    model.surname = Set(fields.surname.clone());
    model.email = Set(fields.email.clone());
    model.mobile_phone = Set(fields.mobile_phone.clone());
    model.password = Set(fields.password.clone());
    model.membership_type_id = Set(fields.membership_type.into());
    model.company_id = Set(fields.company_id.map(|id| id.0));
    model.institution_code = Set(fields.institution_code.clone());
}

#[async_trait]
impl CustomerRepository for PostgresCustomerRepository {
    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, DomainError> {
        let result = customers::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        result.map(Customer::try_from).transpose()
    }

    async fn find_all(&self, active: Option<bool>) -> Result<Vec<Customer>, DomainError> {
        let mut query = customers::Entity::find();
        if let Some(active) = active {
            query = query.filter(customers::Column::Active.eq(active));
        }

        let results = query
            .order_by_asc(customers::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        results.into_iter().map(Customer::try_from).collect()
    }

    async fn find_by_company(&self, company_id: CompanyId) -> Result<Vec<Customer>, DomainError> {
        let results = customers::Entity::find()
            .filter(customers::Column::CompanyId.eq(company_id.0))
            .order_by_asc(customers::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        results.into_iter().map(Customer::try_from).collect()
    }

    async fn create(
        &self,
        fields: &CustomerFields,
        actor: UserId,
    ) -> Result<Customer, DomainError> {
        let mut model = customers::ActiveModel {
            active: Set(true),
            created_by: Set(actor.0),
            created_at: Set(now()),
            ..Default::default()
        };
        apply_fields(&mut model, fields);

        let result = model.insert(&self.db).await.map_err(write_error)?;

        Customer::try_from(result)
    }

    async fn update(
        &self,
        id: CustomerId,
        fields: &CustomerFields,
        actor: UserId,
    ) -> Result<Customer, DomainError> {
        let mut model = customers::ActiveModel {
            id: Set(id.0),
            updated_by: Set(Some(actor.0)),
            updated_at: Set(Some(now())),
            ..Default::default()
        };
        apply_fields(&mut model, fields);

        let result = model.update(&self.db).await.map_err(write_error)?;

        Customer::try_from(result)
    }

    async fn set_active(
        &self,
        id: CustomerId,
        active: bool,
        actor: UserId,
    ) -> Result<Customer, DomainError> {
        let result = customers::ActiveModel {
            id: Set(id.0),
            active: Set(active),
            updated_by: Set(Some(actor.0)),
            updated_at: Set(Some(now())),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(write_error)?;

        Customer::try_from(result)
    }
}

impl TryFrom<customers::Model> for Customer {
    type Error = DomainError;

    fn try_from(model: customers::Model) -> Result<Self, Self::Error> {
        let membership_type =
            MembershipType::try_from(model.membership_type_id).map_err(DomainError::Internal)?;

        Ok(Customer {
            id: CustomerId(model.id),
            fields: CustomerFields {
                name: model.name,
                surname: model.surname,
                email: model.email,
                mobile_phone: model.mobile_phone,
                password: model.password,
                membership_type,
                company_id: model.company_id.map(CompanyId),
                institution_code: model.institution_code,
            },
            audit: audit_from_columns(
                model.active,
                model.created_by,
                model.created_at,
                model.updated_by,
                model.updated_at,
            ),
        })
    }
}
