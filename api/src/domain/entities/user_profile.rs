//! User profile sections
//!
//! Contact, ability, payment and rate data hang off a user, one row each.
//! Ability and rate carry child lists that are synchronised on save.

use std::collections::HashSet;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use super::audit::Audit;
use super::ids::{
    LanguageId, RateItemId, TechnologyKnowledgeId, TerminologyId, UserAbilityId, UserContactId,
    UserId, UserPaymentId, UserRateId,
};
use super::user::User;

// ============================================================================
// Contact
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserContactFields {
    pub address: Option<String>,
    pub alternative_email: Option<String>,
    pub alternative_phone1: Option<String>,
    pub alternative_phone2: Option<String>,
    pub district_id: Option<i32>,
    pub fax: Option<String>,
    pub postal_code: Option<String>,
    pub skype: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserContact {
    pub id: UserContactId,
    pub user_id: UserId,
    #[serde(flatten)]
    pub fields: UserContactFields,
    #[serde(flatten)]
    pub audit: Audit,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserContactInput {
    #[serde(default)]
    pub id: Option<UserContactId>,
    #[serde(flatten)]
    pub fields: UserContactFields,
}

// ============================================================================
// Ability
// ============================================================================

/// Daily throughput a user commits to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Capacity {
    pub translation: Option<i32>,
    pub reviews: Option<i32>,
    pub proofreading: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserAbilityFields {
    pub mother_tongue_id: Option<i32>,
    pub bilingual_tongue_id: Option<i32>,
    pub main_clients: Option<String>,
    pub qualifications: Option<String>,
    pub years_of_experience: Option<i32>,
    pub quality_ensure_description: Option<String>,
    pub capacity: Capacity,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TechnologyKnowledgeFields {
    pub operating_system: Option<String>,
    pub software_id: Option<i32>,
    pub software_version: Option<String>,
    pub rating: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnologyKnowledge {
    pub id: TechnologyKnowledgeId,
    pub user_ability_id: UserAbilityId,
    #[serde(flatten)]
    pub fields: TechnologyKnowledgeFields,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAbility {
    pub id: UserAbilityId,
    pub user_id: UserId,
    #[serde(flatten)]
    pub fields: UserAbilityFields,
    /// Terminology ids the user specialises in
    pub specializations: Vec<TerminologyId>,
    pub technology_knowledges: Vec<TechnologyKnowledge>,
    #[serde(flatten)]
    pub audit: Audit,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAbilityInput {
    #[serde(default)]
    pub id: Option<UserAbilityId>,
    #[serde(flatten)]
    pub fields: UserAbilityFields,
    #[serde(default)]
    pub specializations: Vec<TerminologyId>,
    #[serde(default)]
    pub technology_knowledges: Vec<ChildInput<TechnologyKnowledgeId, TechnologyKnowledgeFields>>,
}

// ============================================================================
// Payment
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BankAccount {
    pub account_holder_full_name: Option<String>,
    pub account_number: Option<String>,
    pub bank_account_type_id: Option<i32>,
    pub bank_name: Option<String>,
    pub bank_address: Option<String>,
    pub beneficiary_address: Option<String>,
    pub city_country_bank: Option<String>,
    pub iban: Option<String>,
    pub paypal_email_address: Option<String>,
    pub swift_bic_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPaymentFields {
    pub currency_id: Option<i32>,
    pub working_type_id: Option<i32>,
    pub minimum_charge_amount: Option<f64>,
    pub vat_tax_no: Option<String>,
    pub bank_account: BankAccount,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayment {
    pub id: UserPaymentId,
    pub user_id: UserId,
    #[serde(flatten)]
    pub fields: UserPaymentFields,
    #[serde(flatten)]
    pub audit: Audit,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPaymentInput {
    #[serde(default)]
    pub id: Option<UserPaymentId>,
    #[serde(flatten)]
    pub fields: UserPaymentFields,
}

// ============================================================================
// Rate
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserRateFields {
    pub dtp_rate: Option<f64>,
    pub glossary_creation_rate: Option<f64>,
    pub linguistic_testing_rate: Option<f64>,
    pub review_lqa_rate: Option<f64>,
    pub review_sme_rate: Option<f64>,
    pub terminology_extraction_rate: Option<f64>,
    pub translation_memory_management_rate: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RateItemFields {
    pub service_type_id: Option<i32>,
    pub source_language_id: Option<LanguageId>,
    pub target_language_id: Option<LanguageId>,
    pub price: Option<f64>,
    pub certificate_id: Option<i32>,
    pub sworn_or_certified: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateItem {
    pub id: RateItemId,
    pub user_rate_id: UserRateId,
    #[serde(flatten)]
    pub fields: RateItemFields,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRate {
    pub id: UserRateId,
    pub user_id: UserId,
    #[serde(flatten)]
    pub fields: UserRateFields,
    pub rate_items: Vec<RateItem>,
    #[serde(flatten)]
    pub audit: Audit,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRateInput {
    #[serde(default)]
    pub id: Option<UserRateId>,
    #[serde(flatten)]
    pub fields: UserRateFields,
    #[serde(default)]
    pub rate_items: Vec<ChildInput<RateItemId, RateItemFields>>,
}

// ============================================================================
// Profile
// ============================================================================

/// A user with every profile section that has been filled in
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(flatten)]
    pub user: User,
    pub contact: Option<UserContact>,
    pub ability: Option<UserAbility>,
    pub payment: Option<UserPayment>,
    pub rate: Option<UserRate>,
}

// ============================================================================
// Child list synchronisation
// ============================================================================

/// A child row as submitted by a client; no id means "new row"
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildInput<I, F> {
    #[serde(default = "Option::default")]
    pub id: Option<I>,
    #[serde(flatten)]
    pub fields: F,
}

/// Writes needed to make a stored child list match a submitted one
#[derive(Debug, Clone, PartialEq)]
pub struct SyncPlan<I, F> {
    pub update: Vec<(I, F)>,
    pub insert: Vec<F>,
    pub remove: Vec<I>,
}

impl<I, F> SyncPlan<I, F> {
    pub fn is_empty(&self) -> bool {
        self.update.is_empty() && self.insert.is_empty() && self.remove.is_empty()
    }
}

/// Listed existing rows are updated, ids that do not belong to the parent are
/// ignored, rows without an id are inserted and unlisted rows are removed.
pub fn plan_child_sync<I, F>(existing: &[I], incoming: &[ChildInput<I, F>]) -> SyncPlan<I, F>
where
    I: Copy + Eq + Hash,
    F: Clone,
{
    let known: HashSet<I> = existing.iter().copied().collect();
    let mut listed = HashSet::new();
    let mut update = Vec::new();
    let mut insert = Vec::new();

    for child in incoming {
        match child.id {
            Some(id) if known.contains(&id) => {
                if listed.insert(id) {
                    update.push((id, child.fields.clone()));
                }
            }
            Some(_) => {}
            None => insert.push(child.fields.clone()),
        }
    }

    let remove = existing
        .iter()
        .copied()
        .filter(|id| !listed.contains(id))
        .collect();

    SyncPlan {
        update,
        insert,
        remove,
    }
}

/// Set difference for plain id lists: returns (to insert, to remove)
pub fn plan_id_sync<I>(existing: &[I], wanted: &[I]) -> (Vec<I>, Vec<I>)
where
    I: Copy + Eq + Hash,
{
    let have: HashSet<I> = existing.iter().copied().collect();
    let want: HashSet<I> = wanted.iter().copied().collect();

    let mut seen = HashSet::new();
    let insert = wanted
        .iter()
        .copied()
        .filter(|id| !have.contains(id) && seen.insert(*id))
        .collect();
    let remove = existing
        .iter()
        .copied()
        .filter(|id| !want.contains(id))
        .collect();

    (insert, remove)
}
