//! SeaORM entities
//!
//! Table models for the back-office schema. Domain types live in
//! `domain::entities`; conversions are in the postgres adapters.

pub mod companies;
pub mod company_terminologies;
pub mod customers;
pub mod languages;
pub mod messages;
pub mod orders;
pub mod price_lists;
pub mod rate_items;
pub mod reference_items;
pub mod source_target_languages;
pub mod technology_knowledges;
pub mod terminologies;
pub mod user_abilities;
pub mod user_contacts;
pub mod user_payments;
pub mod user_rates;
pub mod user_roles;
pub mod user_scores;
pub mod user_specializations;
pub mod users;
