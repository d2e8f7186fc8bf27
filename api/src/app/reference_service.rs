//! Reference data service
//!
//! Closed enums are answered from code; everything else comes from the
//! `reference_items` table.

use std::sync::Arc;

use crate::domain::entities::{
    EnumItem, ReferenceItem, ReferenceItemId, ReferenceKind, TranslationQuality, UserRoleType,
};
use crate::domain::ports::ReferenceDataRepository;
use crate::error::AppError;

pub struct ReferenceDataService<RR>
where
    RR: ReferenceDataRepository,
{
    items: Arc<RR>,
}

impl<RR> ReferenceDataService<RR>
where
    RR: ReferenceDataRepository,
{
    pub fn new(items: Arc<RR>) -> Self {
        Self { items }
    }

    pub fn user_role_types(&self) -> Vec<EnumItem> {
        UserRoleType::ALL
            .into_iter()
            .map(|r| EnumItem {
                id: r.id(),
                name: r.name(),
            })
            .collect()
    }

    pub fn translation_qualities(&self) -> Vec<EnumItem> {
        TranslationQuality::ALL
            .into_iter()
            .map(|q| EnumItem {
                id: q.id(),
                name: q.name(),
            })
            .collect()
    }

    /// Every active item of a kind
    pub async fn items(&self, kind: ReferenceKind) -> Result<Vec<ReferenceItem>, AppError> {
        Ok(self.items.find_by_kind(kind, None).await?)
    }

    /// Active items below a parent, e.g. the cities of a country
    pub async fn children(
        &self,
        kind: ReferenceKind,
        parent_id: ReferenceItemId,
    ) -> Result<Vec<ReferenceItem>, AppError> {
        Ok(self.items.find_by_kind(kind, Some(parent_id)).await?)
    }
}
