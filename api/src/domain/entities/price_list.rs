//! Price list entity
//!
//! Per-character prices for one language pair, split into five length bands.

use serde::{Deserialize, Serialize};

use super::audit::Audit;
use super::ids::{LanguageId, PriceListId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceListFields {
    pub source_language_id: LanguageId,
    pub target_language_id: LanguageId,
    #[serde(rename = "char_0_100")]
    pub char_0_100: f64,
    #[serde(rename = "char_100_150")]
    pub char_100_150: f64,
    #[serde(rename = "char_150_200")]
    pub char_150_200: f64,
    #[serde(rename = "char_200_500")]
    pub char_200_500: f64,
    #[serde(rename = "char_500_more")]
    pub char_500_more: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceList {
    pub id: PriceListId,
    #[serde(flatten)]
    pub fields: PriceListFields,
    #[serde(flatten)]
    pub audit: Audit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_band_field_names() {
        let json = r#"{
            "sourceLanguageId": 1, "targetLanguageId": 2,
            "char_0_100": 0.1, "char_100_150": 0.2, "char_150_200": 0.3,
            "char_200_500": 0.4, "char_500_more": 0.5
        }"#;
        let fields: PriceListFields = serde_json::from_str(json).unwrap();
        assert_eq!(fields.char_500_more, 0.5);
    }
}
