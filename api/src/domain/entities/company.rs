//! Company domain entity

use serde::{Deserialize, Serialize};

use super::audit::Audit;
use super::ids::CompanyId;

/// Fields copied by add/edit; everything else on the row is audit data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyFields {
    pub name: String,
    #[serde(default)]
    pub tax_number: Option<String>,
    #[serde(default)]
    pub tax_office: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub extension_number: Option<String>,
    #[serde(default)]
    pub accounting_email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub authorized_email: Option<String>,
    #[serde(default)]
    pub authorized_full_name: Option<String>,
    #[serde(default)]
    pub authorized_mobile_phone: Option<String>,
    #[serde(default)]
    pub is_contract_price: bool,
    #[serde(default, rename = "isUsingPO")]
    pub is_using_po: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: CompanyId,
    #[serde(flatten)]
    pub fields: CompanyFields,
    #[serde(flatten)]
    pub audit: Audit,
}
