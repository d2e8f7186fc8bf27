//! Customer service

use std::sync::Arc;

use crate::app::password::PasswordHasher;
use crate::domain::entities::{CompanyId, Customer, CustomerFields, CustomerId, UserId};
use crate::domain::ports::CustomerRepository;
use crate::error::AppError;

pub struct CustomerService<CR>
where
    CR: CustomerRepository,
{
    customers: Arc<CR>,
    hasher: PasswordHasher,
}

impl<CR> CustomerService<CR>
where
    CR: CustomerRepository,
{
    pub fn new(customers: Arc<CR>, hasher: PasswordHasher) -> Self {
        Self { customers, hasher }
    }

    pub async fn list(&self, active: Option<bool>) -> Result<Vec<Customer>, AppError> {
        Ok(self.customers.find_all(active).await?)
    }

    pub async fn get(&self, id: CustomerId) -> Result<Customer, AppError> {
        self.customers
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("customer {}", id)))
    }

    pub async fn by_company(&self, company_id: CompanyId) -> Result<Vec<Customer>, AppError> {
        Ok(self.customers.find_by_company(company_id).await?)
    }

    pub async fn add(&self, fields: CustomerFields, actor: UserId) -> Result<Customer, AppError> {
        let mut fields = fields.normalized();
        if fields.password.is_empty() {
            return Err(AppError::BadRequest("password is empty".to_string()));
        }
        fields.password = self.hasher.hash(&fields.password)?;

        let customer = self.customers.create(&fields, actor).await?;
        tracing::info!(customer_id = %customer.id, created_by = %actor, "Customer added");
        Ok(customer)
    }

    /// An empty password keeps the stored one
    pub async fn update(
        &self,
        id: CustomerId,
        fields: CustomerFields,
        actor: UserId,
    ) -> Result<Customer, AppError> {
        let existing = self.get(id).await?;

        let mut fields = fields.normalized();
        fields.password = if fields.password.is_empty() {
            existing.fields.password
        } else {
            self.hasher.hash(&fields.password)?
        };

        Ok(self.customers.update(id, &fields, actor).await?)
    }

    pub async fn set_active(
        &self,
        id: CustomerId,
        active: bool,
        actor: UserId,
    ) -> Result<Customer, AppError> {
        self.get(id).await?;
        Ok(self.customers.set_active(id, active, actor).await?)
    }
}
