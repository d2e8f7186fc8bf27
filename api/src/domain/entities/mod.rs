//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod audit;
pub mod company;
pub mod customer;
pub mod ids;
pub mod language;
pub mod message;
pub mod order;
pub mod price_list;
pub mod reference;
pub mod terminology;
pub mod user;
pub mod user_profile;

pub use audit::Audit;
pub use company::{Company, CompanyFields};
pub use customer::{Customer, CustomerFields, MembershipType};
pub use ids::*;
pub use language::{Language, LanguageFields, LanguagePair, SourceTargetLanguage};
pub use message::{Message, MessageQuery, NewMessage};
pub use order::Order;
pub use price_list::{PriceList, PriceListFields};
pub use reference::{EnumItem, ReferenceItem, ReferenceKind};
pub use terminology::{
    CompanyTerminology, CompanyTerminologyFields, Terminology, TerminologyFields,
};
pub use user::{
    NewUser, RoleGroup, ScoreBand, TranslationQuality, User, UserFields, UserRole, UserRoleType,
    UserScore, UserUpdate,
};
pub use user_profile::{
    plan_child_sync, plan_id_sync, BankAccount, Capacity, ChildInput, RateItem, RateItemFields,
    SyncPlan, TechnologyKnowledge, TechnologyKnowledgeFields, UserAbility, UserAbilityFields,
    UserAbilityInput, UserContact, UserContactFields, UserContactInput, UserPayment,
    UserPaymentFields, UserPaymentInput, UserProfile, UserRate, UserRateFields, UserRateInput,
};
