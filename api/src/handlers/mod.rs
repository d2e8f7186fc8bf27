//! HTTP handlers
//!
//! Axum request handlers for the API endpoints. Every handler answers with
//! the `ServiceResult` envelope; failures go through `AppError`.

pub mod auth;
pub mod catalogue;
pub mod customers;
pub mod messages;
pub mod reference;
pub mod users;

use serde::Deserialize;

/// Body of `edit*` requests: the row id next to the editable fields
#[derive(Debug, Deserialize)]
pub struct EditRequest<I, F> {
    pub id: I,
    #[serde(flatten)]
    pub fields: F,
}

/// Body of `delete*` requests
#[derive(Debug, Deserialize)]
pub struct IdRequest<I> {
    pub id: I,
}

/// Body of `setActive` requests
#[derive(Debug, Deserialize)]
pub struct SetActiveRequest<I> {
    pub id: I,
    pub active: bool,
}

/// Optional `?active=` filter on list endpoints
#[derive(Debug, Default, Deserialize)]
pub struct ActiveFilter {
    pub active: Option<bool>,
}
