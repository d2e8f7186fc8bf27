//! Company service

use std::sync::Arc;

use crate::domain::entities::{Company, CompanyFields, CompanyId, UserId};
use crate::domain::ports::CompanyRepository;
use crate::error::AppError;

pub struct CompanyService<CR>
where
    CR: CompanyRepository,
{
    companies: Arc<CR>,
}

impl<CR> CompanyService<CR>
where
    CR: CompanyRepository,
{
    pub fn new(companies: Arc<CR>) -> Self {
        Self { companies }
    }

    /// Lists active companies unless a filter is given
    pub async fn list(&self, active: Option<bool>) -> Result<Vec<Company>, AppError> {
        Ok(self.companies.find_all(active.or(Some(true))).await?)
    }

    pub async fn get(&self, id: CompanyId) -> Result<Company, AppError> {
        self.companies
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("company {}", id)))
    }

    pub async fn add(&self, fields: CompanyFields, actor: UserId) -> Result<Company, AppError> {
        let company = self.companies.create(&fields, actor).await?;
        tracing::info!(company_id = %company.id, created_by = %actor, "Company added");
        Ok(company)
    }

    pub async fn update(
        &self,
        id: CompanyId,
        fields: CompanyFields,
        actor: UserId,
    ) -> Result<Company, AppError> {
        self.get(id).await?;
        Ok(self.companies.update(id, &fields, actor).await?)
    }

    /// Soft delete
    pub async fn delete(&self, id: CompanyId, actor: UserId) -> Result<Company, AppError> {
        self.set_active(id, false, actor).await
    }

    pub async fn set_active(
        &self,
        id: CompanyId,
        active: bool,
        actor: UserId,
    ) -> Result<Company, AppError> {
        self.get(id).await?;
        Ok(self.companies.set_active(id, active, actor).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{test_company, test_company_fields, InMemoryCompanyRepository};

    fn create_service(repo: InMemoryCompanyRepository) -> CompanyService<InMemoryCompanyRepository> {
        CompanyService::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn add_then_get_round_trips() {
        let service = create_service(InMemoryCompanyRepository::new());

        let added = service
            .add(test_company_fields("Acme Translations"), UserId(5))
            .await
            .unwrap();
        let fetched = service.get(added.id).await.unwrap();

        assert_eq!(fetched, added);
        assert!(fetched.audit.active);
        assert_eq!(fetched.audit.created_by, UserId(5));
        assert_eq!(fetched.fields.name, "Acme Translations");
    }

    #[tokio::test]
    async fn update_replaces_whitelisted_fields_only() {
        let company = test_company(1, "Acme");
        let created_at = company.audit.created_at;
        let service = create_service(InMemoryCompanyRepository::new().with_company(company));

        let mut fields = test_company_fields("Acme Ltd");
        fields.is_using_po = true;
        let updated = service.update(CompanyId(1), fields, UserId(8)).await.unwrap();

        assert_eq!(updated.fields.name, "Acme Ltd");
        assert!(updated.fields.is_using_po);
        assert_eq!(updated.audit.created_by, UserId(1));
        assert_eq!(updated.audit.created_at, created_at);
        assert_eq!(updated.audit.updated_by, Some(UserId(8)));
        assert!(updated.audit.active);
    }

    #[tokio::test]
    async fn update_missing_company_is_no_related_data() {
        let service = create_service(InMemoryCompanyRepository::new());

        let result = service
            .update(CompanyId(3), test_company_fields("X"), UserId(1))
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_is_soft_and_hides_from_default_list() {
        let service = create_service(
            InMemoryCompanyRepository::new()
                .with_company(test_company(1, "Acme"))
                .with_company(test_company(2, "Globex")),
        );

        let deleted = service.delete(CompanyId(1), UserId(1)).await.unwrap();
        assert!(!deleted.audit.active);

        let listed = service.list(None).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, CompanyId(2));

        let passive = service.list(Some(false)).await.unwrap();
        assert_eq!(passive.len(), 1);
        assert_eq!(passive[0].id, CompanyId(1));

        // Still retrievable by id
        assert!(service.get(CompanyId(1)).await.is_ok());
    }

    #[tokio::test]
    async fn set_active_reactivates() {
        let mut company = test_company(1, "Acme");
        company.audit.active = false;
        let service = create_service(InMemoryCompanyRepository::new().with_company(company));

        let company = service.set_active(CompanyId(1), true, UserId(1)).await.unwrap();

        assert!(company.audit.active);
    }

    #[tokio::test]
    async fn failed_insert_maps_to_unable_to_insert() {
        let service = create_service(InMemoryCompanyRepository::new().failing_inserts());

        let result = service.add(test_company_fields("Acme"), UserId(1)).await;

        let err = result.unwrap_err();
        assert_eq!(
            err.exception_code(),
            crate::error::ExceptionCode::UnableToInsert
        );
    }

    #[tokio::test]
    async fn listing_is_idempotent() {
        let service = create_service(
            InMemoryCompanyRepository::new()
                .with_company(test_company(1, "Acme"))
                .with_company(test_company(2, "Globex")),
        );

        let first = service.list(None).await.unwrap();
        let second = service.list(None).await.unwrap();

        assert_eq!(first, second);
    }
}
