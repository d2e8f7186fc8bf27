//! User domain entity
//!
//! Back-office users, their roles and average quality scores, plus the
//! role-type and translation-quality enums used by order matching.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::audit::Audit;
use super::ids::{UserId, UserRoleId};

/// Closed set of roles a user can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum UserRoleType {
    Translator = 1,
    Editor = 2,
    Admin = 3,
    ProofReader = 4,
    /// Holds both the translator and editor roles
    TranslatorEditor = 5,
}

impl UserRoleType {
    pub const ALL: [UserRoleType; 5] = [
        UserRoleType::Translator,
        UserRoleType::Editor,
        UserRoleType::Admin,
        UserRoleType::ProofReader,
        UserRoleType::TranslatorEditor,
    ];

    pub fn id(self) -> i32 {
        self as i32
    }

    pub fn name(self) -> &'static str {
        match self {
            UserRoleType::Translator => "Translator",
            UserRoleType::Editor => "Editor",
            UserRoleType::Admin => "Admin",
            UserRoleType::ProofReader => "ProofReader",
            UserRoleType::TranslatorEditor => "TranslatorEditor",
        }
    }
}

impl TryFrom<i32> for UserRoleType {
    type Error = String;

    fn try_from(id: i32) -> Result<Self, Self::Error> {
        UserRoleType::ALL
            .into_iter()
            .find(|r| r.id() == id)
            .ok_or_else(|| format!("Unknown user role type: {}", id))
    }
}

impl From<UserRoleType> for i32 {
    fn from(role: UserRoleType) -> Self {
        role.id()
    }
}

/// Inclusive score interval a tier accepts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBand {
    pub min: f64,
    pub max: f64,
}

impl ScoreBand {
    pub fn contains(&self, score: f64) -> bool {
        score >= self.min && score <= self.max
    }
}

/// Quality tier requested by an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum TranslationQuality {
    Standard = 1,
    Premium = 2,
    Platinum = 3,
}

impl TranslationQuality {
    pub const ALL: [TranslationQuality; 3] = [
        TranslationQuality::Standard,
        TranslationQuality::Premium,
        TranslationQuality::Platinum,
    ];

    pub fn id(self) -> i32 {
        self as i32
    }

    pub fn name(self) -> &'static str {
        match self {
            TranslationQuality::Standard => "Standard",
            TranslationQuality::Premium => "Premium",
            TranslationQuality::Platinum => "Platinum",
        }
    }

    /// Band edges are inclusive on both sides, so a 3.0 scorer qualifies for
    /// Standard and Premium, and a 4.0 scorer for Premium and Platinum.
    pub fn score_band(self) -> ScoreBand {
        match self {
            TranslationQuality::Standard => ScoreBand { min: 1.0, max: 3.0 },
            TranslationQuality::Premium => ScoreBand { min: 3.0, max: 4.0 },
            TranslationQuality::Platinum => ScoreBand { min: 4.0, max: 5.0 },
        }
    }
}

impl TryFrom<i32> for TranslationQuality {
    type Error = String;

    fn try_from(id: i32) -> Result<Self, Self::Error> {
        TranslationQuality::ALL
            .into_iter()
            .find(|q| q.id() == id)
            .ok_or_else(|| format!("Unknown translation quality: {}", id))
    }
}

impl From<TranslationQuality> for i32 {
    fn from(quality: TranslationQuality) -> Self {
        quality.id()
    }
}

/// Group of roles searched when staffing an order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleGroup {
    Translators,
    Editors,
    ProofReaders,
}

impl RoleGroup {
    pub fn roles(self) -> &'static [UserRoleType] {
        match self {
            RoleGroup::Translators => &[UserRoleType::Translator, UserRoleType::TranslatorEditor],
            RoleGroup::Editors => &[UserRoleType::Editor],
            RoleGroup::ProofReaders => &[UserRoleType::ProofReader],
        }
    }
}

impl std::fmt::Display for RoleGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoleGroup::Translators => write!(f, "translator"),
            RoleGroup::Editors => write!(f, "editor"),
            RoleGroup::ProofReaders => write!(f, "proof reader"),
        }
    }
}

/// Editable personal data of a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFields {
    pub name: String,
    pub surname: String,
    pub email: String,
    #[serde(default)]
    pub mobile_phone: Option<String>,
    #[serde(default)]
    pub gender_id: Option<i32>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRole {
    pub id: UserRoleId,
    #[serde(rename = "userRoleTypeId")]
    pub role: UserRoleType,
    pub active: bool,
    pub created_by: UserId,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserScore {
    pub average_translating_score: f64,
    pub average_editing_score: f64,
    pub average_proofreading_score: f64,
}

/// A back-office user
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    #[serde(flatten)]
    pub fields: UserFields,
    /// Stored credential: an Argon2id PHC string or a legacy plaintext value
    #[serde(skip_serializing)]
    pub password: String,
    pub password_retry_count: i32,
    pub roles: Vec<UserRole>,
    pub score: Option<UserScore>,
    #[serde(flatten)]
    pub audit: Audit,
}

impl User {
    pub fn is_active(&self) -> bool {
        self.audit.active
    }

    pub fn has_any_role(&self, roles: &[UserRoleType]) -> bool {
        self.roles.iter().any(|r| roles.contains(&r.role))
    }
}

/// Data needed to create a new user
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    #[serde(flatten)]
    pub fields: UserFields,
    pub password: String,
    #[serde(default)]
    pub roles: Vec<UserRoleType>,
}

/// Whitelisted changes applied by "edit user"
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(flatten)]
    pub fields: UserFields,
    /// Only replaced when present and non-empty
    #[serde(default)]
    pub password: Option<String>,
    /// Replaces the role list when non-empty
    #[serde(default)]
    pub roles: Vec<UserRoleType>,
}
