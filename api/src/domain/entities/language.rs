//! Language and source/target language pair entities

use serde::{Deserialize, Serialize};

use super::audit::Audit;
use super::ids::{LanguageId, SourceTargetLanguageId, UserId};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageFields {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    pub id: LanguageId,
    #[serde(flatten)]
    pub fields: LanguageFields,
    #[serde(flatten)]
    pub audit: Audit,
}

/// Translation direction offered by the agency (join row, hard-deleted)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguagePair {
    pub source_language_id: LanguageId,
    pub target_language_id: LanguageId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceTargetLanguage {
    pub id: SourceTargetLanguageId,
    #[serde(flatten)]
    pub pair: LanguagePair,
    pub active: bool,
    pub created_by: UserId,
}
