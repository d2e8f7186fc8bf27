//! User handlers
//!
//! Administration, profile sections and staffing lookups under
//! `/api/userapi`. Profile section edits take the owning `userId` next to the
//! section fields; an absent section `id` creates the section.

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;

use super::{ActiveFilter, EditRequest, SetActiveRequest};
use crate::auth::Actor;
use crate::domain::entities::{
    NewUser, OrderId, RateItem, TechnologyKnowledge, User, UserAbility, UserAbilityId,
    UserAbilityInput, UserContact, UserContactInput, UserId, UserPayment, UserPaymentInput,
    UserProfile, UserRate, UserRateId, UserRateInput, UserRoleType, UserUpdate,
};
use crate::domain::ports::Repositories;
use crate::error::{AppError, ServiceResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    pub user_id: UserId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderQuery {
    pub order_id: OrderId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAbilityQuery {
    pub user_ability_id: UserAbilityId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRateQuery {
    pub user_rate_id: UserRateId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleTypesRequest {
    pub user_role_type_ids: Vec<UserRoleType>,
}

/// Body of profile section edits
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionRequest<I> {
    pub user_id: UserId,
    #[serde(flatten)]
    pub input: I,
}

/// GET /api/userapi/getUser?userId=
///
/// The user together with every profile section filled in so far.
pub async fn get_user<R: Repositories>(
    State(state): State<AppState<R>>,
    Query(query): Query<UserQuery>,
) -> Result<ServiceResult<UserProfile>, AppError> {
    let profile = state.user_service.get_user(query.user_id).await?;
    Ok(ServiceResult::success(profile))
}

pub async fn get_users<R: Repositories>(
    State(state): State<AppState<R>>,
    Query(filter): Query<ActiveFilter>,
) -> Result<ServiceResult<Vec<User>>, AppError> {
    let users = state.user_service.list_users(filter.active).await?;
    Ok(ServiceResult::success(users))
}

/// POST /api/userapi/getUsersByRoleTypes
pub async fn get_users_by_role_types<R: Repositories>(
    State(state): State<AppState<R>>,
    Json(request): Json<RoleTypesRequest>,
) -> Result<ServiceResult<Vec<User>>, AppError> {
    let users = state
        .user_service
        .users_by_role_types(&request.user_role_type_ids)
        .await?;
    Ok(ServiceResult::success(users))
}

pub async fn add_user<R: Repositories>(
    State(state): State<AppState<R>>,
    Extension(Actor(actor)): Extension<Actor>,
    Json(new_user): Json<NewUser>,
) -> Result<ServiceResult<User>, AppError> {
    let user = state.user_service.add_user(new_user, actor).await?;
    Ok(ServiceResult::success(user))
}

pub async fn edit_user<R: Repositories>(
    State(state): State<AppState<R>>,
    Extension(Actor(actor)): Extension<Actor>,
    Json(request): Json<EditRequest<UserId, UserUpdate>>,
) -> Result<ServiceResult<User>, AppError> {
    let user = state
        .user_service
        .edit_user(request.id, request.fields, actor)
        .await?;
    Ok(ServiceResult::success(user))
}

pub async fn set_active<R: Repositories>(
    State(state): State<AppState<R>>,
    Extension(Actor(actor)): Extension<Actor>,
    Json(request): Json<SetActiveRequest<UserId>>,
) -> Result<ServiceResult<User>, AppError> {
    let user = state
        .user_service
        .set_active(request.id, request.active, actor)
        .await?;
    Ok(ServiceResult::success(user))
}

// ============================================================================
// Profile sections
// ============================================================================

pub async fn edit_user_contact<R: Repositories>(
    State(state): State<AppState<R>>,
    Extension(Actor(actor)): Extension<Actor>,
    Json(request): Json<SectionRequest<UserContactInput>>,
) -> Result<ServiceResult<UserContact>, AppError> {
    let contact = state
        .user_service
        .save_contact(request.user_id, request.input, actor)
        .await?;
    Ok(ServiceResult::success(contact))
}

/// Saves the ability row and synchronises its specializations and
/// technology knowledges in one go.
pub async fn edit_user_ability<R: Repositories>(
    State(state): State<AppState<R>>,
    Extension(Actor(actor)): Extension<Actor>,
    Json(request): Json<SectionRequest<UserAbilityInput>>,
) -> Result<ServiceResult<UserAbility>, AppError> {
    let ability = state
        .user_service
        .save_ability(request.user_id, request.input, actor)
        .await?;
    Ok(ServiceResult::success(ability))
}

pub async fn edit_user_payment<R: Repositories>(
    State(state): State<AppState<R>>,
    Extension(Actor(actor)): Extension<Actor>,
    Json(request): Json<SectionRequest<UserPaymentInput>>,
) -> Result<ServiceResult<UserPayment>, AppError> {
    let payment = state
        .user_service
        .save_payment(request.user_id, request.input, actor)
        .await?;
    Ok(ServiceResult::success(payment))
}

pub async fn edit_user_rate<R: Repositories>(
    State(state): State<AppState<R>>,
    Extension(Actor(actor)): Extension<Actor>,
    Json(request): Json<SectionRequest<UserRateInput>>,
) -> Result<ServiceResult<UserRate>, AppError> {
    let rate = state
        .user_service
        .save_rate(request.user_id, request.input, actor)
        .await?;
    Ok(ServiceResult::success(rate))
}

pub async fn get_technology_knowledges<R: Repositories>(
    State(state): State<AppState<R>>,
    Query(query): Query<UserAbilityQuery>,
) -> Result<ServiceResult<Vec<TechnologyKnowledge>>, AppError> {
    let knowledges = state
        .user_service
        .technology_knowledges(query.user_ability_id)
        .await?;
    Ok(ServiceResult::success(knowledges))
}

pub async fn get_rate_items<R: Repositories>(
    State(state): State<AppState<R>>,
    Query(query): Query<UserRateQuery>,
) -> Result<ServiceResult<Vec<RateItem>>, AppError> {
    let items = state.user_service.rate_items(query.user_rate_id).await?;
    Ok(ServiceResult::success(items))
}

// ============================================================================
// Staffing
// ============================================================================

/// GET /api/userapi/getTranslatorsAccordingToOrderTranslationQuality?orderId=
pub async fn get_translators_for_order<R: Repositories>(
    State(state): State<AppState<R>>,
    Query(query): Query<OrderQuery>,
) -> Result<ServiceResult<Vec<User>>, AppError> {
    let users = state
        .user_service
        .translators_for_order(query.order_id)
        .await?;
    Ok(ServiceResult::success(users))
}

pub async fn get_editors_for_order<R: Repositories>(
    State(state): State<AppState<R>>,
    Query(query): Query<OrderQuery>,
) -> Result<ServiceResult<Vec<User>>, AppError> {
    let users = state.user_service.editors_for_order(query.order_id).await?;
    Ok(ServiceResult::success(users))
}

pub async fn get_proof_readers_for_order<R: Repositories>(
    State(state): State<AppState<R>>,
    Query(query): Query<OrderQuery>,
) -> Result<ServiceResult<Vec<User>>, AppError> {
    let users = state
        .user_service
        .proof_readers_for_order(query.order_id)
        .await?;
    Ok(ServiceResult::success(users))
}
