//! Reference data handlers

use axum::extract::{Query, State};
use serde::Deserialize;

use crate::domain::entities::{EnumItem, ReferenceItem, ReferenceItemId, ReferenceKind};
use crate::domain::ports::Repositories;
use crate::error::{AppError, ServiceResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryQuery {
    pub country_id: ReferenceItemId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityQuery {
    pub city_id: ReferenceItemId,
}

pub async fn get_user_role_types<R: Repositories>(
    State(state): State<AppState<R>>,
) -> ServiceResult<Vec<EnumItem>> {
    ServiceResult::success(state.reference_service.user_role_types())
}

pub async fn get_translation_qualities<R: Repositories>(
    State(state): State<AppState<R>>,
) -> ServiceResult<Vec<EnumItem>> {
    ServiceResult::success(state.reference_service.translation_qualities())
}

async fn items_of<R: Repositories>(
    state: &AppState<R>,
    kind: ReferenceKind,
) -> Result<ServiceResult<Vec<ReferenceItem>>, AppError> {
    let items = state.reference_service.items(kind).await?;
    Ok(ServiceResult::success(items))
}

pub async fn get_countries<R: Repositories>(
    State(state): State<AppState<R>>,
) -> Result<ServiceResult<Vec<ReferenceItem>>, AppError> {
    items_of(&state, ReferenceKind::Country).await
}

/// GET /api/commonapi/getCitiesByCountryId?countryId=
pub async fn get_cities_by_country<R: Repositories>(
    State(state): State<AppState<R>>,
    Query(query): Query<CountryQuery>,
) -> Result<ServiceResult<Vec<ReferenceItem>>, AppError> {
    let cities = state
        .reference_service
        .children(ReferenceKind::City, query.country_id)
        .await?;
    Ok(ServiceResult::success(cities))
}

/// GET /api/commonapi/getDistrictByCityId?cityId=
pub async fn get_districts_by_city<R: Repositories>(
    State(state): State<AppState<R>>,
    Query(query): Query<CityQuery>,
) -> Result<ServiceResult<Vec<ReferenceItem>>, AppError> {
    let districts = state
        .reference_service
        .children(ReferenceKind::District, query.city_id)
        .await?;
    Ok(ServiceResult::success(districts))
}

pub async fn get_tongues<R: Repositories>(
    State(state): State<AppState<R>>,
) -> Result<ServiceResult<Vec<ReferenceItem>>, AppError> {
    items_of(&state, ReferenceKind::Tongue).await
}

pub async fn get_specializations<R: Repositories>(
    State(state): State<AppState<R>>,
) -> Result<ServiceResult<Vec<ReferenceItem>>, AppError> {
    items_of(&state, ReferenceKind::Specialization).await
}

pub async fn get_softwares<R: Repositories>(
    State(state): State<AppState<R>>,
) -> Result<ServiceResult<Vec<ReferenceItem>>, AppError> {
    items_of(&state, ReferenceKind::Software).await
}

pub async fn get_bank_account_types<R: Repositories>(
    State(state): State<AppState<R>>,
) -> Result<ServiceResult<Vec<ReferenceItem>>, AppError> {
    items_of(&state, ReferenceKind::BankAccountType).await
}

pub async fn get_currencies<R: Repositories>(
    State(state): State<AppState<R>>,
) -> Result<ServiceResult<Vec<ReferenceItem>>, AppError> {
    items_of(&state, ReferenceKind::Currency).await
}

pub async fn get_working_types<R: Repositories>(
    State(state): State<AppState<R>>,
) -> Result<ServiceResult<Vec<ReferenceItem>>, AppError> {
    items_of(&state, ReferenceKind::WorkingType).await
}

pub async fn get_service_types<R: Repositories>(
    State(state): State<AppState<R>>,
) -> Result<ServiceResult<Vec<ReferenceItem>>, AppError> {
    items_of(&state, ReferenceKind::ServiceType).await
}
