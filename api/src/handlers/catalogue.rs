//! Catalogue handlers
//!
//! Companies, languages and language pairs, terminologies, company
//! terminologies and price lists under `/api/commonapi`.

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;

use super::{ActiveFilter, EditRequest, IdRequest, SetActiveRequest};
use crate::auth::Actor;
use crate::domain::entities::{
    Company, CompanyFields, CompanyId, CompanyTerminology, CompanyTerminologyFields,
    CompanyTerminologyId, Language, LanguageFields, LanguageId, LanguagePair, PriceList,
    PriceListFields, PriceListId, SourceTargetLanguage, Terminology, TerminologyFields,
    TerminologyId,
};
use crate::domain::ports::Repositories;
use crate::error::{AppError, ServiceResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyQuery {
    pub company_id: CompanyId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageQuery {
    pub language_id: LanguageId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceLanguageQuery {
    pub source_language_id: LanguageId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerminologyQuery {
    pub terminology_id: TerminologyId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyTerminologyQuery {
    pub company_terminology_id: CompanyTerminologyId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceListQuery {
    pub price_list_id: PriceListId,
}

// ============================================================================
// Companies
// ============================================================================

/// GET /api/commonapi/getCompanies
///
/// Active companies unless `?active=false` is given.
pub async fn get_companies<R: Repositories>(
    State(state): State<AppState<R>>,
    Query(filter): Query<ActiveFilter>,
) -> Result<ServiceResult<Vec<Company>>, AppError> {
    let companies = state.company_service.list(filter.active).await?;
    Ok(ServiceResult::success(companies))
}

/// GET /api/commonapi/getCompany?companyId=
pub async fn get_company<R: Repositories>(
    State(state): State<AppState<R>>,
    Query(query): Query<CompanyQuery>,
) -> Result<ServiceResult<Company>, AppError> {
    let company = state.company_service.get(query.company_id).await?;
    Ok(ServiceResult::success(company))
}

pub async fn add_company<R: Repositories>(
    State(state): State<AppState<R>>,
    Extension(Actor(actor)): Extension<Actor>,
    Json(fields): Json<CompanyFields>,
) -> Result<ServiceResult<Company>, AppError> {
    let company = state.company_service.add(fields, actor).await?;
    Ok(ServiceResult::success(company))
}

pub async fn edit_company<R: Repositories>(
    State(state): State<AppState<R>>,
    Extension(Actor(actor)): Extension<Actor>,
    Json(request): Json<EditRequest<CompanyId, CompanyFields>>,
) -> Result<ServiceResult<Company>, AppError> {
    let company = state
        .company_service
        .update(request.id, request.fields, actor)
        .await?;
    Ok(ServiceResult::success(company))
}

pub async fn delete_company<R: Repositories>(
    State(state): State<AppState<R>>,
    Extension(Actor(actor)): Extension<Actor>,
    Json(request): Json<IdRequest<CompanyId>>,
) -> Result<ServiceResult<Company>, AppError> {
    let company = state.company_service.delete(request.id, actor).await?;
    Ok(ServiceResult::success(company))
}

pub async fn set_company_active<R: Repositories>(
    State(state): State<AppState<R>>,
    Extension(Actor(actor)): Extension<Actor>,
    Json(request): Json<SetActiveRequest<CompanyId>>,
) -> Result<ServiceResult<Company>, AppError> {
    let company = state
        .company_service
        .set_active(request.id, request.active, actor)
        .await?;
    Ok(ServiceResult::success(company))
}

// ============================================================================
// Languages
// ============================================================================

pub async fn get_languages<R: Repositories>(
    State(state): State<AppState<R>>,
    Query(filter): Query<ActiveFilter>,
) -> Result<ServiceResult<Vec<Language>>, AppError> {
    let languages = state.language_service.list(filter.active).await?;
    Ok(ServiceResult::success(languages))
}

pub async fn get_language<R: Repositories>(
    State(state): State<AppState<R>>,
    Query(query): Query<LanguageQuery>,
) -> Result<ServiceResult<Language>, AppError> {
    let language = state.language_service.get(query.language_id).await?;
    Ok(ServiceResult::success(language))
}

pub async fn add_language<R: Repositories>(
    State(state): State<AppState<R>>,
    Extension(Actor(actor)): Extension<Actor>,
    Json(fields): Json<LanguageFields>,
) -> Result<ServiceResult<Language>, AppError> {
    let language = state.language_service.add(fields, actor).await?;
    Ok(ServiceResult::success(language))
}

pub async fn edit_language<R: Repositories>(
    State(state): State<AppState<R>>,
    Extension(Actor(actor)): Extension<Actor>,
    Json(request): Json<EditRequest<LanguageId, LanguageFields>>,
) -> Result<ServiceResult<Language>, AppError> {
    let language = state
        .language_service
        .update(request.id, request.fields, actor)
        .await?;
    Ok(ServiceResult::success(language))
}

pub async fn delete_language<R: Repositories>(
    State(state): State<AppState<R>>,
    Extension(Actor(actor)): Extension<Actor>,
    Json(request): Json<IdRequest<LanguageId>>,
) -> Result<ServiceResult<Language>, AppError> {
    let language = state.language_service.delete(request.id, actor).await?;
    Ok(ServiceResult::success(language))
}

/// GET /api/commonapi/getTargetLanguages?sourceLanguageId=
pub async fn get_target_languages<R: Repositories>(
    State(state): State<AppState<R>>,
    Query(query): Query<SourceLanguageQuery>,
) -> Result<ServiceResult<Vec<SourceTargetLanguage>>, AppError> {
    let pairs = state
        .language_service
        .target_languages(query.source_language_id)
        .await?;
    Ok(ServiceResult::success(pairs))
}

pub async fn add_source_target_language<R: Repositories>(
    State(state): State<AppState<R>>,
    Extension(Actor(actor)): Extension<Actor>,
    Json(pair): Json<LanguagePair>,
) -> Result<ServiceResult<SourceTargetLanguage>, AppError> {
    let pair = state.language_service.add_pair(pair, actor).await?;
    Ok(ServiceResult::success(pair))
}

/// Removes the join row; the deleted pair is echoed back
pub async fn delete_source_target_language<R: Repositories>(
    State(state): State<AppState<R>>,
    Json(pair): Json<LanguagePair>,
) -> Result<ServiceResult<SourceTargetLanguage>, AppError> {
    let pair = state.language_service.delete_pair(pair).await?;
    Ok(ServiceResult::success(pair))
}

// ============================================================================
// Terminologies
// ============================================================================

pub async fn get_terminologies<R: Repositories>(
    State(state): State<AppState<R>>,
    Query(filter): Query<ActiveFilter>,
) -> Result<ServiceResult<Vec<Terminology>>, AppError> {
    let terminologies = state.terminology_service.list(filter.active).await?;
    Ok(ServiceResult::success(terminologies))
}

pub async fn get_terminology<R: Repositories>(
    State(state): State<AppState<R>>,
    Query(query): Query<TerminologyQuery>,
) -> Result<ServiceResult<Terminology>, AppError> {
    let terminology = state.terminology_service.get(query.terminology_id).await?;
    Ok(ServiceResult::success(terminology))
}

pub async fn add_terminology<R: Repositories>(
    State(state): State<AppState<R>>,
    Extension(Actor(actor)): Extension<Actor>,
    Json(fields): Json<TerminologyFields>,
) -> Result<ServiceResult<Terminology>, AppError> {
    let terminology = state.terminology_service.add(fields, actor).await?;
    Ok(ServiceResult::success(terminology))
}

pub async fn edit_terminology<R: Repositories>(
    State(state): State<AppState<R>>,
    Extension(Actor(actor)): Extension<Actor>,
    Json(request): Json<EditRequest<TerminologyId, TerminologyFields>>,
) -> Result<ServiceResult<Terminology>, AppError> {
    let terminology = state
        .terminology_service
        .update(request.id, request.fields, actor)
        .await?;
    Ok(ServiceResult::success(terminology))
}

pub async fn delete_terminology<R: Repositories>(
    State(state): State<AppState<R>>,
    Extension(Actor(actor)): Extension<Actor>,
    Json(request): Json<IdRequest<TerminologyId>>,
) -> Result<ServiceResult<Terminology>, AppError> {
    let terminology = state.terminology_service.delete(request.id, actor).await?;
    Ok(ServiceResult::success(terminology))
}

// ============================================================================
// Company terminologies
// ============================================================================

pub async fn get_company_terminologies<R: Repositories>(
    State(state): State<AppState<R>>,
    Query(filter): Query<ActiveFilter>,
) -> Result<ServiceResult<Vec<CompanyTerminology>>, AppError> {
    let terminologies = state
        .terminology_service
        .list_company_terminologies(filter.active)
        .await?;
    Ok(ServiceResult::success(terminologies))
}

pub async fn get_company_terminology<R: Repositories>(
    State(state): State<AppState<R>>,
    Query(query): Query<CompanyTerminologyQuery>,
) -> Result<ServiceResult<CompanyTerminology>, AppError> {
    let terminology = state
        .terminology_service
        .get_company_terminology(query.company_terminology_id)
        .await?;
    Ok(ServiceResult::success(terminology))
}

pub async fn add_company_terminology<R: Repositories>(
    State(state): State<AppState<R>>,
    Extension(Actor(actor)): Extension<Actor>,
    Json(fields): Json<CompanyTerminologyFields>,
) -> Result<ServiceResult<CompanyTerminology>, AppError> {
    let terminology = state
        .terminology_service
        .add_company_terminology(fields, actor)
        .await?;
    Ok(ServiceResult::success(terminology))
}

pub async fn edit_company_terminology<R: Repositories>(
    State(state): State<AppState<R>>,
    Extension(Actor(actor)): Extension<Actor>,
    Json(request): Json<EditRequest<CompanyTerminologyId, CompanyTerminologyFields>>,
) -> Result<ServiceResult<CompanyTerminology>, AppError> {
    let terminology = state
        .terminology_service
        .update_company_terminology(request.id, request.fields, actor)
        .await?;
    Ok(ServiceResult::success(terminology))
}

pub async fn delete_company_terminology<R: Repositories>(
    State(state): State<AppState<R>>,
    Json(request): Json<IdRequest<CompanyTerminologyId>>,
) -> Result<ServiceResult<CompanyTerminology>, AppError> {
    let terminology = state
        .terminology_service
        .delete_company_terminology(request.id)
        .await?;
    Ok(ServiceResult::success(terminology))
}

// ============================================================================
// Price lists
// ============================================================================

pub async fn get_price_lists<R: Repositories>(
    State(state): State<AppState<R>>,
    Query(filter): Query<ActiveFilter>,
) -> Result<ServiceResult<Vec<PriceList>>, AppError> {
    let price_lists = state.price_list_service.list(filter.active).await?;
    Ok(ServiceResult::success(price_lists))
}

pub async fn get_price_list<R: Repositories>(
    State(state): State<AppState<R>>,
    Query(query): Query<PriceListQuery>,
) -> Result<ServiceResult<PriceList>, AppError> {
    let price_list = state.price_list_service.get(query.price_list_id).await?;
    Ok(ServiceResult::success(price_list))
}

pub async fn add_price_list<R: Repositories>(
    State(state): State<AppState<R>>,
    Extension(Actor(actor)): Extension<Actor>,
    Json(fields): Json<PriceListFields>,
) -> Result<ServiceResult<PriceList>, AppError> {
    let price_list = state.price_list_service.add(fields, actor).await?;
    Ok(ServiceResult::success(price_list))
}

pub async fn edit_price_list<R: Repositories>(
    State(state): State<AppState<R>>,
    Extension(Actor(actor)): Extension<Actor>,
    Json(request): Json<EditRequest<PriceListId, PriceListFields>>,
) -> Result<ServiceResult<PriceList>, AppError> {
    let price_list = state
        .price_list_service
        .update(request.id, request.fields, actor)
        .await?;
    Ok(ServiceResult::success(price_list))
}

pub async fn delete_price_list<R: Repositories>(
    State(state): State<AppState<R>>,
    Extension(Actor(actor)): Extension<Actor>,
    Json(request): Json<IdRequest<PriceListId>>,
) -> Result<ServiceResult<PriceList>, AppError> {
    let price_list = state.price_list_service.delete(request.id, actor).await?;
    Ok(ServiceResult::success(price_list))
}
