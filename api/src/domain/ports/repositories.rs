//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::{
    Company, CompanyFields, CompanyId, CompanyTerminology, CompanyTerminologyFields,
    CompanyTerminologyId, Customer, CustomerFields, CustomerId, Language, LanguageFields,
    LanguageId, LanguagePair, Message, MessageId, MessageQuery, NewMessage, NewUser, Order,
    OrderId, PriceList, PriceListFields, PriceListId, RateItem, ReferenceItem, ReferenceItemId,
    ReferenceKind, ScoreBand, SourceTargetLanguage, TechnologyKnowledge, Terminology,
    TerminologyFields, TerminologyId, User, UserAbility, UserAbilityId, UserAbilityInput,
    UserContact, UserContactFields, UserFields, UserId, UserPayment, UserPaymentFields,
    UserProfile, UserRate, UserRateId, UserRateInput, UserRoleType,
};
use crate::error::DomainError;

/// Repository for User entities and their profile sections
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user (with roles and score) by ID
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError>;

    /// Find a user by email, preferring an active row when several share it
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// List users, optionally filtered by active flag
    async fn find_all(&self, active: Option<bool>) -> Result<Vec<User>, DomainError>;

    /// Users holding any of the given roles
    async fn find_by_role_types(&self, roles: &[UserRoleType]) -> Result<Vec<User>, DomainError>;

    /// Users holding any of the given roles whose average translating score
    /// lies inside the band. Each user appears once.
    async fn find_by_roles_and_score(
        &self,
        roles: &[UserRoleType],
        band: ScoreBand,
    ) -> Result<Vec<User>, DomainError>;

    /// Create a user; `user.password` is stored as given
    async fn create(&self, user: &NewUser, actor: UserId) -> Result<User, DomainError>;

    /// Replace the whitelisted fields; password and roles only when given
    async fn update(
        &self,
        id: UserId,
        fields: &UserFields,
        password: Option<&str>,
        roles: Option<&[UserRoleType]>,
        actor: UserId,
    ) -> Result<User, DomainError>;

    /// Count one failed login as a single atomic write, deactivating the user
    /// once the new count reaches `max_retry_count`. Returns the new count,
    /// or `None` when no active user matched.
    async fn record_failed_login(
        &self,
        id: UserId,
        max_retry_count: i32,
    ) -> Result<Option<i32>, DomainError>;

    /// Clear the retry counter after a successful login
    async fn reset_retry_count(&self, id: UserId) -> Result<(), DomainError>;

    /// Store a new credential and reset the retry counter
    async fn update_password(&self, id: UserId, password: &str) -> Result<(), DomainError>;

    /// Activate or deactivate a user; always resets the retry counter
    async fn set_active(&self, id: UserId, active: bool, actor: UserId)
        -> Result<User, DomainError>;

    /// Load a user together with every profile section
    async fn find_profile(&self, id: UserId) -> Result<Option<UserProfile>, DomainError>;

    // Profile sections (one row per user, inserted on first save)

    async fn save_contact(
        &self,
        user_id: UserId,
        fields: &UserContactFields,
        actor: UserId,
    ) -> Result<UserContact, DomainError>;

    async fn save_ability(
        &self,
        user_id: UserId,
        input: &UserAbilityInput,
        actor: UserId,
    ) -> Result<UserAbility, DomainError>;

    async fn save_payment(
        &self,
        user_id: UserId,
        fields: &UserPaymentFields,
        actor: UserId,
    ) -> Result<UserPayment, DomainError>;

    async fn save_rate(
        &self,
        user_id: UserId,
        input: &UserRateInput,
        actor: UserId,
    ) -> Result<UserRate, DomainError>;

    async fn find_technology_knowledges(
        &self,
        ability_id: UserAbilityId,
    ) -> Result<Vec<TechnologyKnowledge>, DomainError>;

    async fn find_rate_items(&self, rate_id: UserRateId) -> Result<Vec<RateItem>, DomainError>;
}

/// Repository for Order entities (read-only here)
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, DomainError>;
}

/// Repository for Company entities
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    async fn find_by_id(&self, id: CompanyId) -> Result<Option<Company>, DomainError>;

    async fn find_all(&self, active: Option<bool>) -> Result<Vec<Company>, DomainError>;

    async fn create(&self, fields: &CompanyFields, actor: UserId) -> Result<Company, DomainError>;

    async fn update(
        &self,
        id: CompanyId,
        fields: &CompanyFields,
        actor: UserId,
    ) -> Result<Company, DomainError>;

    async fn set_active(
        &self,
        id: CompanyId,
        active: bool,
        actor: UserId,
    ) -> Result<Company, DomainError>;
}

/// Repository for Language entities and source/target pairs
#[async_trait]
pub trait LanguageRepository: Send + Sync {
    async fn find_by_id(&self, id: LanguageId) -> Result<Option<Language>, DomainError>;

    async fn find_all(&self, active: Option<bool>) -> Result<Vec<Language>, DomainError>;

    async fn create(&self, fields: &LanguageFields, actor: UserId)
        -> Result<Language, DomainError>;

    async fn update(
        &self,
        id: LanguageId,
        fields: &LanguageFields,
        actor: UserId,
    ) -> Result<Language, DomainError>;

    async fn set_active(
        &self,
        id: LanguageId,
        active: bool,
        actor: UserId,
    ) -> Result<Language, DomainError>;

    /// Pairs whose source is the given language
    async fn find_pairs_by_source(
        &self,
        source: LanguageId,
    ) -> Result<Vec<SourceTargetLanguage>, DomainError>;

    async fn create_pair(
        &self,
        pair: &LanguagePair,
        actor: UserId,
    ) -> Result<SourceTargetLanguage, DomainError>;

    /// Remove a pair row; returns the removed row, if any
    async fn delete_pair(
        &self,
        pair: &LanguagePair,
    ) -> Result<Option<SourceTargetLanguage>, DomainError>;
}

/// Repository for Terminology entities
#[async_trait]
pub trait TerminologyRepository: Send + Sync {
    async fn find_by_id(&self, id: TerminologyId) -> Result<Option<Terminology>, DomainError>;

    async fn find_all(&self, active: Option<bool>) -> Result<Vec<Terminology>, DomainError>;

    async fn create(
        &self,
        fields: &TerminologyFields,
        actor: UserId,
    ) -> Result<Terminology, DomainError>;

    async fn update(
        &self,
        id: TerminologyId,
        fields: &TerminologyFields,
        actor: UserId,
    ) -> Result<Terminology, DomainError>;

    async fn set_active(
        &self,
        id: TerminologyId,
        active: bool,
        actor: UserId,
    ) -> Result<Terminology, DomainError>;
}

/// Repository for company terminology files
#[async_trait]
pub trait CompanyTerminologyRepository: Send + Sync {
    async fn find_by_id(
        &self,
        id: CompanyTerminologyId,
    ) -> Result<Option<CompanyTerminology>, DomainError>;

    async fn find_all(&self, active: Option<bool>)
        -> Result<Vec<CompanyTerminology>, DomainError>;

    async fn create(
        &self,
        fields: &CompanyTerminologyFields,
        actor: UserId,
    ) -> Result<CompanyTerminology, DomainError>;

    async fn update(
        &self,
        id: CompanyTerminologyId,
        fields: &CompanyTerminologyFields,
        actor: UserId,
    ) -> Result<CompanyTerminology, DomainError>;

    /// Hard delete; returns the removed row, if any
    async fn delete(
        &self,
        id: CompanyTerminologyId,
    ) -> Result<Option<CompanyTerminology>, DomainError>;
}

/// Repository for PriceList entities
#[async_trait]
pub trait PriceListRepository: Send + Sync {
    async fn find_by_id(&self, id: PriceListId) -> Result<Option<PriceList>, DomainError>;

    async fn find_all(&self, active: Option<bool>) -> Result<Vec<PriceList>, DomainError>;

    async fn create(
        &self,
        fields: &PriceListFields,
        actor: UserId,
    ) -> Result<PriceList, DomainError>;

    async fn update(
        &self,
        id: PriceListId,
        fields: &PriceListFields,
        actor: UserId,
    ) -> Result<PriceList, DomainError>;

    async fn set_active(
        &self,
        id: PriceListId,
        active: bool,
        actor: UserId,
    ) -> Result<PriceList, DomainError>;
}

/// Repository for Customer entities
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, DomainError>;

    async fn find_all(&self, active: Option<bool>) -> Result<Vec<Customer>, DomainError>;

    async fn find_by_company(&self, company_id: CompanyId) -> Result<Vec<Customer>, DomainError>;

    async fn create(&self, fields: &CustomerFields, actor: UserId)
        -> Result<Customer, DomainError>;

    async fn update(
        &self,
        id: CustomerId,
        fields: &CustomerFields,
        actor: UserId,
    ) -> Result<Customer, DomainError>;

    async fn set_active(
        &self,
        id: CustomerId,
        active: bool,
        actor: UserId,
    ) -> Result<Customer, DomainError>;
}

/// Repository for Message entities
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Store a message visible to both parties
    async fn create(&self, message: &NewMessage, actor: UserId) -> Result<Message, DomainError>;

    async fn find_by_id(&self, id: MessageId) -> Result<Option<Message>, DomainError>;

    /// Inbox: addressed to the user and not deleted by them
    async fn find_incoming(&self, user_id: UserId) -> Result<Vec<Message>, DomainError>;

    /// Outbox: sent by the user and not deleted by them
    async fn find_sent(&self, user_id: UserId) -> Result<Vec<Message>, DomainError>;

    async fn search(&self, query: &MessageQuery) -> Result<Vec<Message>, DomainError>;

    async fn set_read_date(
        &self,
        id: MessageId,
        read_at: DateTime<Utc>,
    ) -> Result<Message, DomainError>;

    /// Clear only the sender flag
    async fn hide_from_sender(&self, id: MessageId) -> Result<Message, DomainError>;

    /// Clear only the recipient flag
    async fn hide_from_recipient(&self, id: MessageId) -> Result<Message, DomainError>;

    /// Delete the row if both flags are cleared; false when nothing was removed
    async fn purge_if_hidden(&self, id: MessageId) -> Result<bool, DomainError>;
}

/// Read-only lookup lists
#[async_trait]
pub trait ReferenceDataRepository: Send + Sync {
    /// Active items of one kind, optionally restricted to a parent item
    async fn find_by_kind(
        &self,
        kind: ReferenceKind,
        parent_id: Option<ReferenceItemId>,
    ) -> Result<Vec<ReferenceItem>, DomainError>;
}

/// One concrete repository type per port
///
/// Lets the HTTP state be generic over a single parameter: PostgreSQL in
/// production, in-memory stores in tests.
pub trait Repositories: Send + Sync + 'static {
    type Users: UserRepository + 'static;
    type Orders: OrderRepository + 'static;
    type Companies: CompanyRepository + 'static;
    type Languages: LanguageRepository + 'static;
    type Terminologies: TerminologyRepository + 'static;
    type CompanyTerminologies: CompanyTerminologyRepository + 'static;
    type PriceLists: PriceListRepository + 'static;
    type Customers: CustomerRepository + 'static;
    type Messages: MessageRepository + 'static;
    type ReferenceData: ReferenceDataRepository + 'static;
}
