//! Customer handlers

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;

use super::{ActiveFilter, EditRequest, SetActiveRequest};
use crate::auth::Actor;
use crate::domain::entities::{CompanyId, Customer, CustomerFields, CustomerId};
use crate::domain::ports::Repositories;
use crate::error::{AppError, ServiceResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerQuery {
    pub customer_id: CustomerId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyQuery {
    pub company_id: CompanyId,
}

/// POST /api/customerapi/addCustomer
///
/// Personal customers are stored without a company.
pub async fn add_customer<R: Repositories>(
    State(state): State<AppState<R>>,
    Extension(Actor(actor)): Extension<Actor>,
    Json(fields): Json<CustomerFields>,
) -> Result<ServiceResult<Customer>, AppError> {
    let customer = state.customer_service.add(fields, actor).await?;
    Ok(ServiceResult::success(customer))
}

pub async fn edit_customer<R: Repositories>(
    State(state): State<AppState<R>>,
    Extension(Actor(actor)): Extension<Actor>,
    Json(request): Json<EditRequest<CustomerId, CustomerFields>>,
) -> Result<ServiceResult<Customer>, AppError> {
    let customer = state
        .customer_service
        .update(request.id, request.fields, actor)
        .await?;
    Ok(ServiceResult::success(customer))
}

pub async fn get_customers<R: Repositories>(
    State(state): State<AppState<R>>,
    Query(filter): Query<ActiveFilter>,
) -> Result<ServiceResult<Vec<Customer>>, AppError> {
    let customers = state.customer_service.list(filter.active).await?;
    Ok(ServiceResult::success(customers))
}

pub async fn get_customer<R: Repositories>(
    State(state): State<AppState<R>>,
    Query(query): Query<CustomerQuery>,
) -> Result<ServiceResult<Customer>, AppError> {
    let customer = state.customer_service.get(query.customer_id).await?;
    Ok(ServiceResult::success(customer))
}

pub async fn get_customers_by_company<R: Repositories>(
    State(state): State<AppState<R>>,
    Query(query): Query<CompanyQuery>,
) -> Result<ServiceResult<Vec<Customer>>, AppError> {
    let customers = state.customer_service.by_company(query.company_id).await?;
    Ok(ServiceResult::success(customers))
}

pub async fn set_active<R: Repositories>(
    State(state): State<AppState<R>>,
    Extension(Actor(actor)): Extension<Actor>,
    Json(request): Json<SetActiveRequest<CustomerId>>,
) -> Result<ServiceResult<Customer>, AppError> {
    let customer = state
        .customer_service
        .set_active(request.id, request.active, actor)
        .await?;
    Ok(ServiceResult::success(customer))
}
