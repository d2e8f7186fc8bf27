//! Terminology (subject domain) and company terminology file entities

use serde::{Deserialize, Serialize};

use super::audit::Audit;
use super::ids::{CompanyId, CompanyTerminologyId, TerminologyId};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerminologyFields {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Terminology {
    pub id: TerminologyId,
    #[serde(flatten)]
    pub fields: TerminologyFields,
    #[serde(flatten)]
    pub audit: Audit,
}

/// A glossary file uploaded for one company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyTerminologyFields {
    pub name: String,
    pub company_id: CompanyId,
    #[serde(default)]
    pub file_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyTerminology {
    pub id: CompanyTerminologyId,
    #[serde(flatten)]
    pub fields: CompanyTerminologyFields,
    #[serde(flatten)]
    pub audit: Audit,
}
