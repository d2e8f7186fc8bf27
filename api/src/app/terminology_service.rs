//! Terminology service
//!
//! Subject-area terminologies (soft-deleted) and the glossary files a company
//! uploads (hard-deleted).

use std::sync::Arc;

use crate::domain::entities::{
    CompanyTerminology, CompanyTerminologyFields, CompanyTerminologyId, Terminology,
    TerminologyFields, TerminologyId, UserId,
};
use crate::domain::ports::{CompanyTerminologyRepository, TerminologyRepository};
use crate::error::AppError;

pub struct TerminologyService<TR, CTR>
where
    TR: TerminologyRepository,
    CTR: CompanyTerminologyRepository,
{
    terminologies: Arc<TR>,
    company_terminologies: Arc<CTR>,
}

impl<TR, CTR> TerminologyService<TR, CTR>
where
    TR: TerminologyRepository,
    CTR: CompanyTerminologyRepository,
{
    pub fn new(terminologies: Arc<TR>, company_terminologies: Arc<CTR>) -> Self {
        Self {
            terminologies,
            company_terminologies,
        }
    }

    pub async fn list(&self, active: Option<bool>) -> Result<Vec<Terminology>, AppError> {
        Ok(self.terminologies.find_all(active).await?)
    }

    pub async fn get(&self, id: TerminologyId) -> Result<Terminology, AppError> {
        self.terminologies
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("terminology {}", id)))
    }

    pub async fn add(
        &self,
        fields: TerminologyFields,
        actor: UserId,
    ) -> Result<Terminology, AppError> {
        Ok(self.terminologies.create(&fields, actor).await?)
    }

    pub async fn update(
        &self,
        id: TerminologyId,
        fields: TerminologyFields,
        actor: UserId,
    ) -> Result<Terminology, AppError> {
        self.get(id).await?;
        Ok(self.terminologies.update(id, &fields, actor).await?)
    }

    pub async fn delete(&self, id: TerminologyId, actor: UserId) -> Result<Terminology, AppError> {
        self.get(id).await?;
        Ok(self.terminologies.set_active(id, false, actor).await?)
    }

    // Company terminologies

    pub async fn list_company_terminologies(
        &self,
        active: Option<bool>,
    ) -> Result<Vec<CompanyTerminology>, AppError> {
        Ok(self.company_terminologies.find_all(active).await?)
    }

    pub async fn get_company_terminology(
        &self,
        id: CompanyTerminologyId,
    ) -> Result<CompanyTerminology, AppError> {
        self.company_terminologies
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("company terminology {}", id)))
    }

    pub async fn add_company_terminology(
        &self,
        fields: CompanyTerminologyFields,
        actor: UserId,
    ) -> Result<CompanyTerminology, AppError> {
        Ok(self.company_terminologies.create(&fields, actor).await?)
    }

    pub async fn update_company_terminology(
        &self,
        id: CompanyTerminologyId,
        fields: CompanyTerminologyFields,
        actor: UserId,
    ) -> Result<CompanyTerminology, AppError> {
        self.get_company_terminology(id).await?;
        Ok(self.company_terminologies.update(id, &fields, actor).await?)
    }

    /// Removes the row; the removed entity is echoed back
    pub async fn delete_company_terminology(
        &self,
        id: CompanyTerminologyId,
    ) -> Result<CompanyTerminology, AppError> {
        self.company_terminologies
            .delete(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("company terminology {}", id)))
    }
}
