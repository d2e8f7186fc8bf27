//! Order domain entity
//!
//! Only the translation-quality tier is needed to staff an order.

use serde::Serialize;

use super::ids::OrderId;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    /// Raw tier id; may not map to a known `TranslationQuality`
    pub translation_quality_id: i32,
}
