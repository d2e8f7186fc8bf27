//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, RwLock};

use crate::domain::entities::{
    plan_child_sync, plan_id_sync, Audit, Company, CompanyFields, CompanyId, CompanyTerminology,
    CompanyTerminologyFields, CompanyTerminologyId, Customer, CustomerFields, CustomerId,
    Language, LanguageFields, LanguageId, LanguagePair, Message, MessageId, MessageQuery,
    NewMessage, NewUser, Order, OrderId, PriceList, PriceListFields, PriceListId, RateItem,
    RateItemId, ReferenceItem, ReferenceItemId, ReferenceKind, ScoreBand, SourceTargetLanguage,
    SourceTargetLanguageId, TechnologyKnowledge, TechnologyKnowledgeId, Terminology,
    TerminologyFields, TerminologyId, User, UserAbility, UserAbilityId, UserAbilityInput,
    UserContact, UserContactFields, UserContactId, UserFields, UserId, UserPayment,
    UserPaymentFields, UserPaymentId, UserProfile, UserRate, UserRateId, UserRateInput, UserRole,
    UserRoleId, UserRoleType,
};
use crate::domain::ports::{
    CompanyRepository, CompanyTerminologyRepository, CustomerRepository, LanguageRepository,
    MessageRepository, OrderRepository, PriceListRepository, ReferenceDataRepository,
    Repositories, TerminologyRepository, UserRepository,
};
use crate::error::DomainError;

// ============================================================================
// Shared row storage
// ============================================================================

/// Keyed rows plus an id sequence
struct Rows<K, V> {
    rows: RwLock<BTreeMap<K, V>>,
    next_id: AtomicI32,
}

impl<K: Ord, V> Default for Rows<K, V> {
    fn default() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicI32::new(0),
        }
    }
}

impl<K: Ord + Copy + std::fmt::Display, V: Clone> Rows<K, V> {
    fn seed(&self, key: K, raw_id: i32, value: V) {
        self.next_id.fetch_max(raw_id, Ordering::SeqCst);
        self.rows.write().unwrap().insert(key, value);
    }

    fn allocate(&self) -> i32 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn get(&self, key: &K) -> Option<V> {
        self.rows.read().unwrap().get(key).cloned()
    }

    fn filter(&self, keep: impl Fn(&V) -> bool) -> Vec<V> {
        self.rows
            .read()
            .unwrap()
            .values()
            .filter(|v| keep(v))
            .cloned()
            .collect()
    }

    fn insert(&self, key: K, value: V) -> V {
        self.rows.write().unwrap().insert(key, value.clone());
        value
    }

    fn modify(&self, key: &K, change: impl FnOnce(&mut V)) -> Result<V, DomainError> {
        let mut rows = self.rows.write().unwrap();
        let row = rows
            .get_mut(key)
            .ok_or_else(|| DomainError::NotFound(format!("row {} not found", key)))?;
        change(row);
        Ok(row.clone())
    }

    fn remove(&self, key: &K) -> Option<V> {
        self.rows.write().unwrap().remove(key)
    }

    fn remove_if(&self, key: &K, condition: impl Fn(&V) -> bool) -> bool {
        let mut rows = self.rows.write().unwrap();
        if rows.get(key).is_some_and(condition) {
            rows.remove(key);
            return true;
        }
        false
    }

    fn len(&self) -> usize {
        self.rows.read().unwrap().len()
    }
}

fn active_matches(filter: Option<bool>, active: bool) -> bool {
    filter.map_or(true, |wanted| wanted == active)
}

/// Hand control back to the runtime so concurrent callers interleave
async fn settle(interleave: bool) {
    if interleave {
        tokio::task::yield_now().await;
    }
}

// ============================================================================
// In-Memory User Repository
// ============================================================================

#[derive(Default)]
struct UserStore {
    users: BTreeMap<UserId, User>,
    contacts: HashMap<UserId, UserContact>,
    abilities: HashMap<UserId, UserAbility>,
    payments: HashMap<UserId, UserPayment>,
    rates: HashMap<UserId, UserRate>,
    next_id: i32,
}

impl UserStore {
    fn allocate(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn ensure_user(&self, id: UserId) -> Result<(), DomainError> {
        if self.users.contains_key(&id) {
            Ok(())
        } else {
            Err(DomainError::NotFound(format!("User {} not found", id)))
        }
    }

    fn new_roles(&mut self, roles: &[UserRoleType], actor: UserId) -> Vec<UserRole> {
        roles
            .iter()
            .map(|role| UserRole {
                id: UserRoleId(self.allocate()),
                role: *role,
                active: true,
                created_by: actor,
            })
            .collect()
    }

    fn section_audit(existing: Option<&Audit>, actor: UserId) -> Audit {
        match existing {
            Some(audit) => {
                let mut audit = audit.clone();
                audit.touch(actor);
                audit
            }
            None => Audit::created(actor),
        }
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    store: Arc<RwLock<UserStore>>,
    interleave: bool,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a user for testing
    pub fn with_user(self, user: User) -> Self {
        {
            let mut store = self.store.write().unwrap();
            let max_role = user.roles.iter().map(|r| r.id.0).max().unwrap_or(0);
            store.next_id = store.next_id.max(user.id.0).max(max_role);
            store.users.insert(user.id, user);
        }
        self
    }

    /// Yield after lookups and counter writes so joined tasks interleave
    pub fn with_interleaving(mut self) -> Self {
        self.interleave = true;
        self
    }

    /// Inspect stored state directly
    pub fn get(&self, id: UserId) -> Option<User> {
        self.store.read().unwrap().users.get(&id).cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        Ok(self.get(id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let found = {
            let store = self.store.read().unwrap();
            let mut matches: Vec<&User> = store
                .users
                .values()
                .filter(|u| u.fields.email == email)
                .collect();
            matches.sort_by_key(|u| !u.is_active());
            matches.first().map(|u| (*u).clone())
        };
        settle(self.interleave).await;
        Ok(found)
    }

    async fn find_all(&self, active: Option<bool>) -> Result<Vec<User>, DomainError> {
        let store = self.store.read().unwrap();
        Ok(store
            .users
            .values()
            .filter(|u| active_matches(active, u.is_active()))
            .cloned()
            .collect())
    }

    async fn find_by_role_types(&self, roles: &[UserRoleType]) -> Result<Vec<User>, DomainError> {
        let store = self.store.read().unwrap();
        Ok(store
            .users
            .values()
            .filter(|u| u.has_any_role(roles))
            .cloned()
            .collect())
    }

    async fn find_by_roles_and_score(
        &self,
        roles: &[UserRoleType],
        band: ScoreBand,
    ) -> Result<Vec<User>, DomainError> {
        let store = self.store.read().unwrap();
        Ok(store
            .users
            .values()
            .filter(|u| u.has_any_role(roles))
            .filter(|u| {
                u.score
                    .map_or(false, |s| band.contains(s.average_translating_score))
            })
            .cloned()
            .collect())
    }

    async fn create(&self, new_user: &NewUser, actor: UserId) -> Result<User, DomainError> {
        let mut store = self.store.write().unwrap();
        let id = UserId(store.allocate());
        let roles = store.new_roles(&new_user.roles, actor);

        let user = User {
            id,
            fields: new_user.fields.clone(),
            password: new_user.password.clone(),
            password_retry_count: 0,
            roles,
            score: None,
            audit: Audit::created(actor),
        };
        store.users.insert(id, user.clone());
        Ok(user)
    }

    async fn update(
        &self,
        id: UserId,
        fields: &UserFields,
        password: Option<&str>,
        roles: Option<&[UserRoleType]>,
        actor: UserId,
    ) -> Result<User, DomainError> {
        let mut store = self.store.write().unwrap();
        store.ensure_user(id)?;
        let new_roles = roles.map(|r| store.new_roles(r, actor));

        let user = store
            .users
            .get_mut(&id)
            .ok_or_else(|| DomainError::NotFound(format!("User {} not found", id)))?;
        user.fields = fields.clone();
        if let Some(password) = password {
            user.password = password.to_string();
        }
        if let Some(roles) = new_roles {
            user.roles = roles;
        }
        user.audit.touch(actor);
        Ok(user.clone())
    }

    async fn record_failed_login(
        &self,
        id: UserId,
        max_retry_count: i32,
    ) -> Result<Option<i32>, DomainError> {
        let count = {
            let mut store = self.store.write().unwrap();
            store
                .users
                .get_mut(&id)
                .filter(|u| u.is_active())
                .map(|user| {
                    user.password_retry_count += 1;
                    if user.password_retry_count >= max_retry_count {
                        user.audit.active = false;
                    }
                    user.password_retry_count
                })
        };
        settle(self.interleave).await;
        Ok(count)
    }

    async fn reset_retry_count(&self, id: UserId) -> Result<(), DomainError> {
        let mut store = self.store.write().unwrap();
        let user = store
            .users
            .get_mut(&id)
            .ok_or_else(|| DomainError::NotFound(format!("User {} not found", id)))?;
        user.password_retry_count = 0;
        Ok(())
    }

    async fn update_password(&self, id: UserId, password: &str) -> Result<(), DomainError> {
        let mut store = self.store.write().unwrap();
        let user = store
            .users
            .get_mut(&id)
            .ok_or_else(|| DomainError::NotFound(format!("User {} not found", id)))?;
        user.password = password.to_string();
        user.password_retry_count = 0;
        Ok(())
    }

    async fn set_active(
        &self,
        id: UserId,
        active: bool,
        actor: UserId,
    ) -> Result<User, DomainError> {
        let mut store = self.store.write().unwrap();
        let user = store
            .users
            .get_mut(&id)
            .ok_or_else(|| DomainError::NotFound(format!("User {} not found", id)))?;
        user.audit.active = active;
        user.password_retry_count = 0;
        user.audit.touch(actor);
        Ok(user.clone())
    }

    async fn find_profile(&self, id: UserId) -> Result<Option<UserProfile>, DomainError> {
        let store = self.store.read().unwrap();
        Ok(store.users.get(&id).map(|user| UserProfile {
            user: user.clone(),
            contact: store.contacts.get(&id).cloned(),
            ability: store.abilities.get(&id).cloned(),
            payment: store.payments.get(&id).cloned(),
            rate: store.rates.get(&id).cloned(),
        }))
    }

    async fn save_contact(
        &self,
        user_id: UserId,
        fields: &UserContactFields,
        actor: UserId,
    ) -> Result<UserContact, DomainError> {
        let mut store = self.store.write().unwrap();
        store.ensure_user(user_id)?;

        let existing = store.contacts.get(&user_id).cloned();
        let contact = UserContact {
            id: match &existing {
                Some(c) => c.id,
                None => UserContactId(store.allocate()),
            },
            user_id,
            fields: fields.clone(),
            audit: UserStore::section_audit(existing.as_ref().map(|c| &c.audit), actor),
        };
        store.contacts.insert(user_id, contact.clone());
        Ok(contact)
    }

    async fn save_ability(
        &self,
        user_id: UserId,
        input: &UserAbilityInput,
        actor: UserId,
    ) -> Result<UserAbility, DomainError> {
        let mut store = self.store.write().unwrap();
        store.ensure_user(user_id)?;

        let existing = store.abilities.get(&user_id).cloned();
        let ability_id = match &existing {
            Some(a) => a.id,
            None => UserAbilityId(store.allocate()),
        };
        let (mut knowledges, specializations) = existing
            .as_ref()
            .map(|a| (a.technology_knowledges.clone(), a.specializations.clone()))
            .unwrap_or_default();

        let known: Vec<TechnologyKnowledgeId> = knowledges.iter().map(|k| k.id).collect();
        let plan = plan_child_sync(&known, &input.technology_knowledges);
        knowledges.retain(|k| !plan.remove.contains(&k.id));
        for (id, fields) in plan.update {
            if let Some(k) = knowledges.iter_mut().find(|k| k.id == id) {
                k.fields = fields;
            }
        }
        for fields in plan.insert {
            knowledges.push(TechnologyKnowledge {
                id: TechnologyKnowledgeId(store.allocate()),
                user_ability_id: ability_id,
                fields,
                active: true,
            });
        }

        let (insert, remove) = plan_id_sync(&specializations, &input.specializations);
        let mut specializations: Vec<TerminologyId> = specializations
            .into_iter()
            .filter(|s| !remove.contains(s))
            .collect();
        specializations.extend(insert);

        let ability = UserAbility {
            id: ability_id,
            user_id,
            fields: input.fields.clone(),
            specializations,
            technology_knowledges: knowledges,
            audit: UserStore::section_audit(existing.as_ref().map(|a| &a.audit), actor),
        };
        store.abilities.insert(user_id, ability.clone());
        Ok(ability)
    }

    async fn save_payment(
        &self,
        user_id: UserId,
        fields: &UserPaymentFields,
        actor: UserId,
    ) -> Result<UserPayment, DomainError> {
        let mut store = self.store.write().unwrap();
        store.ensure_user(user_id)?;

        let existing = store.payments.get(&user_id).cloned();
        let payment = UserPayment {
            id: match &existing {
                Some(p) => p.id,
                None => UserPaymentId(store.allocate()),
            },
            user_id,
            fields: fields.clone(),
            audit: UserStore::section_audit(existing.as_ref().map(|p| &p.audit), actor),
        };
        store.payments.insert(user_id, payment.clone());
        Ok(payment)
    }

    async fn save_rate(
        &self,
        user_id: UserId,
        input: &UserRateInput,
        actor: UserId,
    ) -> Result<UserRate, DomainError> {
        let mut store = self.store.write().unwrap();
        store.ensure_user(user_id)?;

        let existing = store.rates.get(&user_id).cloned();
        let rate_id = match &existing {
            Some(r) => r.id,
            None => UserRateId(store.allocate()),
        };
        let mut items = existing
            .as_ref()
            .map(|r| r.rate_items.clone())
            .unwrap_or_default();

        let known: Vec<RateItemId> = items.iter().map(|i| i.id).collect();
        let plan = plan_child_sync(&known, &input.rate_items);
        items.retain(|i| !plan.remove.contains(&i.id));
        for (id, fields) in plan.update {
            if let Some(item) = items.iter_mut().find(|i| i.id == id) {
                item.fields = fields;
            }
        }
        for fields in plan.insert {
            items.push(RateItem {
                id: RateItemId(store.allocate()),
                user_rate_id: rate_id,
                fields,
                active: true,
            });
        }

        let rate = UserRate {
            id: rate_id,
            user_id,
            fields: input.fields.clone(),
            rate_items: items,
            audit: UserStore::section_audit(existing.as_ref().map(|r| &r.audit), actor),
        };
        store.rates.insert(user_id, rate.clone());
        Ok(rate)
    }

    async fn find_technology_knowledges(
        &self,
        ability_id: UserAbilityId,
    ) -> Result<Vec<TechnologyKnowledge>, DomainError> {
        let store = self.store.read().unwrap();
        Ok(store
            .abilities
            .values()
            .find(|a| a.id == ability_id)
            .map(|a| a.technology_knowledges.clone())
            .unwrap_or_default())
    }

    async fn find_rate_items(&self, rate_id: UserRateId) -> Result<Vec<RateItem>, DomainError> {
        let store = self.store.read().unwrap();
        Ok(store
            .rates
            .values()
            .find(|r| r.id == rate_id)
            .map(|r| r.rate_items.clone())
            .unwrap_or_default())
    }
}

// ============================================================================
// In-Memory Order Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<HashMap<OrderId, Order>>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_order(self, order: Order) -> Self {
        self.orders.write().unwrap().insert(order.id, order);
        self
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, DomainError> {
        Ok(self.orders.read().unwrap().get(&id).cloned())
    }
}

// ============================================================================
// In-Memory Company Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryCompanyRepository {
    rows: Arc<Rows<CompanyId, Company>>,
    fail_inserts: bool,
}

impl InMemoryCompanyRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_company(self, company: Company) -> Self {
        self.rows.seed(company.id, company.id.0, company.clone());
        self
    }

    /// Make `create` behave like a store that reports zero inserted rows
    pub fn failing_inserts(mut self) -> Self {
        self.fail_inserts = true;
        self
    }
}

#[async_trait]
impl CompanyRepository for InMemoryCompanyRepository {
    async fn find_by_id(&self, id: CompanyId) -> Result<Option<Company>, DomainError> {
        Ok(self.rows.get(&id))
    }

    async fn find_all(&self, active: Option<bool>) -> Result<Vec<Company>, DomainError> {
        Ok(self.rows.filter(|c| active_matches(active, c.audit.active)))
    }

    async fn create(&self, fields: &CompanyFields, actor: UserId) -> Result<Company, DomainError> {
        if self.fail_inserts {
            return Err(DomainError::NotInserted("company".to_string()));
        }
        let id = CompanyId(self.rows.allocate());
        Ok(self.rows.insert(
            id,
            Company {
                id,
                fields: fields.clone(),
                audit: Audit::created(actor),
            },
        ))
    }

    async fn update(
        &self,
        id: CompanyId,
        fields: &CompanyFields,
        actor: UserId,
    ) -> Result<Company, DomainError> {
        self.rows.modify(&id, |c| {
            c.fields = fields.clone();
            c.audit.touch(actor);
        })
    }

    async fn set_active(
        &self,
        id: CompanyId,
        active: bool,
        actor: UserId,
    ) -> Result<Company, DomainError> {
        self.rows.modify(&id, |c| {
            c.audit.active = active;
            c.audit.touch(actor);
        })
    }
}

// ============================================================================
// In-Memory Language Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryLanguageRepository {
    rows: Arc<Rows<LanguageId, Language>>,
    pairs: Arc<Rows<SourceTargetLanguageId, SourceTargetLanguage>>,
}

impl InMemoryLanguageRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_language(self, language: Language) -> Self {
        self.rows.seed(language.id, language.id.0, language.clone());
        self
    }
}

#[async_trait]
impl LanguageRepository for InMemoryLanguageRepository {
    async fn find_by_id(&self, id: LanguageId) -> Result<Option<Language>, DomainError> {
        Ok(self.rows.get(&id))
    }

    async fn find_all(&self, active: Option<bool>) -> Result<Vec<Language>, DomainError> {
        Ok(self.rows.filter(|l| active_matches(active, l.audit.active)))
    }

    async fn create(
        &self,
        fields: &LanguageFields,
        actor: UserId,
    ) -> Result<Language, DomainError> {
        let id = LanguageId(self.rows.allocate());
        Ok(self.rows.insert(
            id,
            Language {
                id,
                fields: fields.clone(),
                audit: Audit::created(actor),
            },
        ))
    }

    async fn update(
        &self,
        id: LanguageId,
        fields: &LanguageFields,
        actor: UserId,
    ) -> Result<Language, DomainError> {
        self.rows.modify(&id, |l| {
            l.fields = fields.clone();
            l.audit.touch(actor);
        })
    }

    async fn set_active(
        &self,
        id: LanguageId,
        active: bool,
        actor: UserId,
    ) -> Result<Language, DomainError> {
        self.rows.modify(&id, |l| {
            l.audit.active = active;
            l.audit.touch(actor);
        })
    }

    async fn find_pairs_by_source(
        &self,
        source: LanguageId,
    ) -> Result<Vec<SourceTargetLanguage>, DomainError> {
        Ok(self.pairs.filter(|p| p.pair.source_language_id == source))
    }

    async fn create_pair(
        &self,
        pair: &LanguagePair,
        actor: UserId,
    ) -> Result<SourceTargetLanguage, DomainError> {
        let id = SourceTargetLanguageId(self.pairs.allocate());
        Ok(self.pairs.insert(
            id,
            SourceTargetLanguage {
                id,
                pair: *pair,
                active: true,
                created_by: actor,
            },
        ))
    }

    async fn delete_pair(
        &self,
        pair: &LanguagePair,
    ) -> Result<Option<SourceTargetLanguage>, DomainError> {
        let found = self.pairs.filter(|p| p.pair == *pair).into_iter().next();
        Ok(found.and_then(|p| self.pairs.remove(&p.id)))
    }
}

// ============================================================================
// In-Memory Terminology Repositories
// ============================================================================

#[derive(Default)]
pub struct InMemoryTerminologyRepository {
    rows: Arc<Rows<TerminologyId, Terminology>>,
}

impl InMemoryTerminologyRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_terminology(self, terminology: Terminology) -> Self {
        self.rows
            .seed(terminology.id, terminology.id.0, terminology.clone());
        self
    }
}

#[async_trait]
impl TerminologyRepository for InMemoryTerminologyRepository {
    async fn find_by_id(&self, id: TerminologyId) -> Result<Option<Terminology>, DomainError> {
        Ok(self.rows.get(&id))
    }

    async fn find_all(&self, active: Option<bool>) -> Result<Vec<Terminology>, DomainError> {
        Ok(self.rows.filter(|t| active_matches(active, t.audit.active)))
    }

    async fn create(
        &self,
        fields: &TerminologyFields,
        actor: UserId,
    ) -> Result<Terminology, DomainError> {
        let id = TerminologyId(self.rows.allocate());
        Ok(self.rows.insert(
            id,
            Terminology {
                id,
                fields: fields.clone(),
                audit: Audit::created(actor),
            },
        ))
    }

    async fn update(
        &self,
        id: TerminologyId,
        fields: &TerminologyFields,
        actor: UserId,
    ) -> Result<Terminology, DomainError> {
        self.rows.modify(&id, |t| {
            t.fields = fields.clone();
            t.audit.touch(actor);
        })
    }

    async fn set_active(
        &self,
        id: TerminologyId,
        active: bool,
        actor: UserId,
    ) -> Result<Terminology, DomainError> {
        self.rows.modify(&id, |t| {
            t.audit.active = active;
            t.audit.touch(actor);
        })
    }
}

#[derive(Default)]
pub struct InMemoryCompanyTerminologyRepository {
    rows: Arc<Rows<CompanyTerminologyId, CompanyTerminology>>,
}

impl InMemoryCompanyTerminologyRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CompanyTerminologyRepository for InMemoryCompanyTerminologyRepository {
    async fn find_by_id(
        &self,
        id: CompanyTerminologyId,
    ) -> Result<Option<CompanyTerminology>, DomainError> {
        Ok(self.rows.get(&id))
    }

    async fn find_all(
        &self,
        active: Option<bool>,
    ) -> Result<Vec<CompanyTerminology>, DomainError> {
        Ok(self.rows.filter(|t| active_matches(active, t.audit.active)))
    }

    async fn create(
        &self,
        fields: &CompanyTerminologyFields,
        actor: UserId,
    ) -> Result<CompanyTerminology, DomainError> {
        let id = CompanyTerminologyId(self.rows.allocate());
        Ok(self.rows.insert(
            id,
            CompanyTerminology {
                id,
                fields: fields.clone(),
                audit: Audit::created(actor),
            },
        ))
    }

    async fn update(
        &self,
        id: CompanyTerminologyId,
        fields: &CompanyTerminologyFields,
        actor: UserId,
    ) -> Result<CompanyTerminology, DomainError> {
        self.rows.modify(&id, |t| {
            t.fields = fields.clone();
            t.audit.touch(actor);
        })
    }

    async fn delete(
        &self,
        id: CompanyTerminologyId,
    ) -> Result<Option<CompanyTerminology>, DomainError> {
        Ok(self.rows.remove(&id))
    }
}

// ============================================================================
// In-Memory PriceList Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryPriceListRepository {
    rows: Arc<Rows<PriceListId, PriceList>>,
}

impl InMemoryPriceListRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PriceListRepository for InMemoryPriceListRepository {
    async fn find_by_id(&self, id: PriceListId) -> Result<Option<PriceList>, DomainError> {
        Ok(self.rows.get(&id))
    }

    async fn find_all(&self, active: Option<bool>) -> Result<Vec<PriceList>, DomainError> {
        Ok(self.rows.filter(|p| active_matches(active, p.audit.active)))
    }

    async fn create(
        &self,
        fields: &PriceListFields,
        actor: UserId,
    ) -> Result<PriceList, DomainError> {
        let id = PriceListId(self.rows.allocate());
        Ok(self.rows.insert(
            id,
            PriceList {
                id,
                fields: fields.clone(),
                audit: Audit::created(actor),
            },
        ))
    }

    async fn update(
        &self,
        id: PriceListId,
        fields: &PriceListFields,
        actor: UserId,
    ) -> Result<PriceList, DomainError> {
        self.rows.modify(&id, |p| {
            p.fields = fields.clone();
            p.audit.touch(actor);
        })
    }

    async fn set_active(
        &self,
        id: PriceListId,
        active: bool,
        actor: UserId,
    ) -> Result<PriceList, DomainError> {
        self.rows.modify(&id, |p| {
            p.audit.active = active;
            p.audit.touch(actor);
        })
    }
}

// ============================================================================
// In-Memory Customer Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryCustomerRepository {
    rows: Arc<Rows<CustomerId, Customer>>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, DomainError> {
        Ok(self.rows.get(&id))
    }

    async fn find_all(&self, active: Option<bool>) -> Result<Vec<Customer>, DomainError> {
        Ok(self.rows.filter(|c| active_matches(active, c.audit.active)))
    }

    async fn find_by_company(&self, company_id: CompanyId) -> Result<Vec<Customer>, DomainError> {
        Ok(self
            .rows
            .filter(|c| c.fields.company_id == Some(company_id)))
    }

    async fn create(
        &self,
        fields: &CustomerFields,
        actor: UserId,
    ) -> Result<Customer, DomainError> {
        let id = CustomerId(self.rows.allocate());
        Ok(self.rows.insert(
            id,
            Customer {
                id,
                fields: fields.clone(),
                audit: Audit::created(actor),
            },
        ))
    }

    async fn update(
        &self,
        id: CustomerId,
        fields: &CustomerFields,
        actor: UserId,
    ) -> Result<Customer, DomainError> {
        self.rows.modify(&id, |c| {
            c.fields = fields.clone();
            c.audit.touch(actor);
        })
    }

    async fn set_active(
        &self,
        id: CustomerId,
        active: bool,
        actor: UserId,
    ) -> Result<Customer, DomainError> {
        self.rows.modify(&id, |c| {
            c.audit.active = active;
            c.audit.touch(actor);
        })
    }
}

// ============================================================================
// In-Memory Message Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryMessageRepository {
    rows: Arc<Rows<MessageId, Message>>,
    interleave: bool,
}

impl InMemoryMessageRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Yield after lookups and flag writes so joined tasks interleave
    pub fn with_interleaving(mut self) -> Self {
        self.interleave = true;
        self
    }

    /// Number of stored rows, including ones hidden from both parties
    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn create(&self, message: &NewMessage, actor: UserId) -> Result<Message, DomainError> {
        let id = MessageId(self.rows.allocate());
        Ok(self.rows.insert(
            id,
            Message {
                id,
                from_user_id: message.from_user_id,
                to_user_id: message.to_user_id,
                title: message.title.clone(),
                content: message.content.clone(),
                read_date: None,
                from_status: true,
                to_status: true,
                created_by: actor,
                created_at: Utc::now(),
            },
        ))
    }

    async fn find_by_id(&self, id: MessageId) -> Result<Option<Message>, DomainError> {
        let found = self.rows.get(&id);
        settle(self.interleave).await;
        Ok(found)
    }

    async fn find_incoming(&self, user_id: UserId) -> Result<Vec<Message>, DomainError> {
        Ok(self.rows.filter(|m| m.to_user_id == user_id && m.to_status))
    }

    async fn find_sent(&self, user_id: UserId) -> Result<Vec<Message>, DomainError> {
        Ok(self
            .rows
            .filter(|m| m.from_user_id == user_id && m.from_status))
    }

    async fn search(&self, query: &MessageQuery) -> Result<Vec<Message>, DomainError> {
        Ok(self.rows.filter(|m| query.matches(m)))
    }

    async fn set_read_date(
        &self,
        id: MessageId,
        read_at: DateTime<Utc>,
    ) -> Result<Message, DomainError> {
        self.rows.modify(&id, |m| m.read_date = Some(read_at))
    }

    async fn hide_from_sender(&self, id: MessageId) -> Result<Message, DomainError> {
        let message = self.rows.modify(&id, |m| m.from_status = false)?;
        settle(self.interleave).await;
        Ok(message)
    }

    async fn hide_from_recipient(&self, id: MessageId) -> Result<Message, DomainError> {
        let message = self.rows.modify(&id, |m| m.to_status = false)?;
        settle(self.interleave).await;
        Ok(message)
    }

    async fn purge_if_hidden(&self, id: MessageId) -> Result<bool, DomainError> {
        Ok(self.rows.remove_if(&id, Message::is_deleted_by_both))
    }
}

// ============================================================================
// In-Memory Reference Data Repository
// ============================================================================

/// A lookup row as stored, before kind/active filtering
#[derive(Debug, Clone)]
pub struct StoredReferenceItem {
    pub kind: ReferenceKind,
    pub active: bool,
    pub item: ReferenceItem,
}

#[derive(Default)]
pub struct InMemoryReferenceDataRepository {
    items: Arc<RwLock<Vec<StoredReferenceItem>>>,
}

impl InMemoryReferenceDataRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(self, item: StoredReferenceItem) -> Self {
        self.items.write().unwrap().push(item);
        self
    }
}

#[async_trait]
impl ReferenceDataRepository for InMemoryReferenceDataRepository {
    async fn find_by_kind(
        &self,
        kind: ReferenceKind,
        parent_id: Option<ReferenceItemId>,
    ) -> Result<Vec<ReferenceItem>, DomainError> {
        Ok(self
            .items
            .read()
            .unwrap()
            .iter()
            .filter(|s| s.kind == kind && s.active)
            .filter(|s| parent_id.map_or(true, |p| s.item.parent_id == Some(p)))
            .map(|s| s.item.clone())
            .collect())
    }
}

// ============================================================================
// Repository bundle
// ============================================================================

/// Binds every port to its in-memory implementation
pub struct InMemoryRepositories;

impl Repositories for InMemoryRepositories {
    type Users = InMemoryUserRepository;
    type Orders = InMemoryOrderRepository;
    type Companies = InMemoryCompanyRepository;
    type Languages = InMemoryLanguageRepository;
    type Terminologies = InMemoryTerminologyRepository;
    type CompanyTerminologies = InMemoryCompanyTerminologyRepository;
    type PriceLists = InMemoryPriceListRepository;
    type Customers = InMemoryCustomerRepository;
    type Messages = InMemoryMessageRepository;
    type ReferenceData = InMemoryReferenceDataRepository;
}
