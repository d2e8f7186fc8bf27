//! Price list service

use std::sync::Arc;

use crate::domain::entities::{PriceList, PriceListFields, PriceListId, UserId};
use crate::domain::ports::PriceListRepository;
use crate::error::AppError;

pub struct PriceListService<PR>
where
    PR: PriceListRepository,
{
    price_lists: Arc<PR>,
}

impl<PR> PriceListService<PR>
where
    PR: PriceListRepository,
{
    pub fn new(price_lists: Arc<PR>) -> Self {
        Self { price_lists }
    }

    pub async fn list(&self, active: Option<bool>) -> Result<Vec<PriceList>, AppError> {
        Ok(self.price_lists.find_all(active).await?)
    }

    pub async fn get(&self, id: PriceListId) -> Result<PriceList, AppError> {
        self.price_lists
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("price list {}", id)))
    }

    pub async fn add(&self, fields: PriceListFields, actor: UserId) -> Result<PriceList, AppError> {
        validate(&fields)?;
        Ok(self.price_lists.create(&fields, actor).await?)
    }

    pub async fn update(
        &self,
        id: PriceListId,
        fields: PriceListFields,
        actor: UserId,
    ) -> Result<PriceList, AppError> {
        validate(&fields)?;
        self.get(id).await?;
        Ok(self.price_lists.update(id, &fields, actor).await?)
    }

    pub async fn delete(&self, id: PriceListId, actor: UserId) -> Result<PriceList, AppError> {
        self.get(id).await?;
        Ok(self.price_lists.set_active(id, false, actor).await?)
    }
}

fn validate(fields: &PriceListFields) -> Result<(), AppError> {
    let bands = [
        fields.char_0_100,
        fields.char_100_150,
        fields.char_150_200,
        fields.char_200_500,
        fields.char_500_more,
    ];
    if bands.iter().any(|p| !p.is_finite() || *p < 0.0) {
        return Err(AppError::BadRequest(
            "prices must be non-negative numbers".to_string(),
        ));
    }
    Ok(())
}
