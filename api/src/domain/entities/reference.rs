//! Read-only reference data (lookup lists)

use serde::Serialize;

use super::ids::ReferenceItemId;

/// Lookup lists stored in the `reference_items` table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    Country,
    City,
    District,
    Tongue,
    Specialization,
    Software,
    BankAccountType,
    Currency,
    WorkingType,
    ServiceType,
}

impl ReferenceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ReferenceKind::Country => "country",
            ReferenceKind::City => "city",
            ReferenceKind::District => "district",
            ReferenceKind::Tongue => "tongue",
            ReferenceKind::Specialization => "specialization",
            ReferenceKind::Software => "software",
            ReferenceKind::BankAccountType => "bank_account_type",
            ReferenceKind::Currency => "currency",
            ReferenceKind::WorkingType => "working_type",
            ReferenceKind::ServiceType => "service_type",
        }
    }
}

impl std::fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceItem {
    pub id: ReferenceItemId,
    pub name: String,
    pub code: Option<String>,
    /// Country of a city, city of a district
    pub parent_id: Option<ReferenceItemId>,
}

/// An `{id, name}` pair describing one variant of a closed enum
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumItem {
    pub id: i32,
    pub name: &'static str,
}
