//! PostgreSQL adapter for UserRepository
//!
//! A user is spread over `users`, `user_roles` and `user_scores`; the profile
//! sections live in their own tables keyed by `user_id`. Writes touching more
//! than one row run in a single transaction.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

use super::{audit_from_columns, now, write_error};
use crate::domain::entities::{
    plan_child_sync, plan_id_sync, BankAccount, Capacity, LanguageId, NewUser, RateItem,
    RateItemFields, RateItemId, ScoreBand, TechnologyKnowledge, TechnologyKnowledgeFields,
    TechnologyKnowledgeId, TerminologyId, User, UserAbility, UserAbilityFields, UserAbilityId,
    UserAbilityInput, UserContact, UserContactFields, UserContactId, UserFields, UserId,
    UserPayment, UserPaymentFields, UserPaymentId, UserProfile, UserRate, UserRateFields,
    UserRateId, UserRateInput, UserRole, UserRoleId, UserRoleType, UserScore,
};
use crate::domain::ports::UserRepository;
use crate::entity::{
    rate_items, technology_knowledges, user_abilities, user_contacts, user_payments, user_rates,
    user_roles, user_scores, user_specializations, users,
};
use crate::error::DomainError;

/// PostgreSQL implementation of UserRepository
pub struct PostgresUserRepository {
    db: DatabaseConnection,
}

impl PostgresUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn db_error(e: sea_orm::DbErr) -> DomainError {
    DomainError::Database(e.to_string())
}

fn not_found(id: UserId) -> DomainError {
    DomainError::NotFound(format!("User {} not found", id))
}

// ============================================================================
// Loading
// ============================================================================

/// Attach active roles and scores to a batch of user rows
async fn load_users<C: ConnectionTrait>(
    conn: &C,
    models: Vec<users::Model>,
) -> Result<Vec<User>, DomainError> {
    if models.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<i32> = models.iter().map(|m| m.id).collect();

    let role_rows = user_roles::Entity::find()
        .filter(user_roles::Column::UserId.is_in(ids.clone()))
        .filter(user_roles::Column::Active.eq(true))
        .order_by_asc(user_roles::Column::Id)
        .all(conn)
        .await
        .map_err(db_error)?;

    let mut roles: HashMap<i32, Vec<UserRole>> = HashMap::new();
    for row in role_rows {
        let Ok(role) = UserRoleType::try_from(row.user_role_type_id) else {
            tracing::warn!(
                user_id = row.user_id,
                role_type = row.user_role_type_id,
                "Skipping unknown user role type"
            );
            continue;
        };
        roles.entry(row.user_id).or_default().push(UserRole {
            id: UserRoleId(row.id),
            role,
            active: row.active,
            created_by: UserId(row.created_by),
        });
    }

    let scores: HashMap<i32, UserScore> = user_scores::Entity::find()
        .filter(user_scores::Column::UserId.is_in(ids))
        .all(conn)
        .await
        .map_err(db_error)?
        .into_iter()
        .map(|s| {
            (
                s.user_id,
                UserScore {
                    average_translating_score: s.average_translating_score,
                    average_editing_score: s.average_editing_score,
                    average_proofreading_score: s.average_proofreading_score,
                },
            )
        })
        .collect();

    Ok(models
        .into_iter()
        .map(|m| {
            let user_roles = roles.remove(&m.id).unwrap_or_default();
            let score = scores.get(&m.id).copied();
            to_user(m, user_roles, score)
        })
        .collect())
}

async fn load_user<C: ConnectionTrait>(conn: &C, id: UserId) -> Result<Option<User>, DomainError> {
    let Some(model) = users::Entity::find_by_id(id.0)
        .one(conn)
        .await
        .map_err(db_error)?
    else {
        return Ok(None);
    };
    Ok(load_users(conn, vec![model]).await?.pop())
}

async fn require_user<C: ConnectionTrait>(conn: &C, id: UserId) -> Result<(), DomainError> {
    users::Entity::find_by_id(id.0)
        .one(conn)
        .await
        .map_err(db_error)?
        .map(|_| ())
        .ok_or_else(|| not_found(id))
}

fn to_user(model: users::Model, roles: Vec<UserRole>, score: Option<UserScore>) -> User {
    User {
        id: UserId(model.id),
        fields: UserFields {
            name: model.name,
            surname: model.surname,
            email: model.email,
            mobile_phone: model.mobile_phone,
            gender_id: model.gender_id,
            birth_date: model.birth_date,
        },
        password: model.password,
        password_retry_count: model.password_retry_count,
        roles,
        score,
        audit: audit_from_columns(
            model.active,
            model.created_by,
            model.created_at,
            model.updated_by,
            model.updated_at,
        ),
    }
}

async fn insert_roles<C: ConnectionTrait>(
    conn: &C,
    user_id: i32,
    roles: &[UserRoleType],
    actor: UserId,
) -> Result<(), DomainError> {
    if roles.is_empty() {
        return Ok(());
    }
    let created_at = now();
    let rows = roles.iter().map(|role| user_roles::ActiveModel {
        user_id: Set(user_id),
        user_role_type_id: Set(role.id()),
        active: Set(true),
        created_by: Set(actor.0),
        created_at: Set(created_at),
        ..Default::default()
    });

    user_roles::Entity::insert_many(rows)
        .exec(conn)
        .await
        .map_err(write_error)?;
    Ok(())
}

// ============================================================================
// Profile sections
// ============================================================================

async fn load_knowledges<C: ConnectionTrait>(
    conn: &C,
    ability_id: i32,
) -> Result<Vec<TechnologyKnowledge>, DomainError> {
    let rows = technology_knowledges::Entity::find()
        .filter(technology_knowledges::Column::UserAbilityId.eq(ability_id))
        .order_by_asc(technology_knowledges::Column::Id)
        .all(conn)
        .await
        .map_err(db_error)?;

    Ok(rows.into_iter().map(|m| m.into()).collect())
}

async fn load_specializations<C: ConnectionTrait>(
    conn: &C,
    ability_id: i32,
) -> Result<Vec<TerminologyId>, DomainError> {
    let rows = user_specializations::Entity::find()
        .filter(user_specializations::Column::UserAbilityId.eq(ability_id))
        .order_by_asc(user_specializations::Column::Id)
        .all(conn)
        .await
        .map_err(db_error)?;

    Ok(rows
        .into_iter()
        .map(|m| TerminologyId(m.terminology_id))
        .collect())
}

async fn load_ability<C: ConnectionTrait>(
    conn: &C,
    model: user_abilities::Model,
) -> Result<UserAbility, DomainError> {
    let specializations = load_specializations(conn, model.id).await?;
    let technology_knowledges = load_knowledges(conn, model.id).await?;

    Ok(UserAbility {
        id: UserAbilityId(model.id),
        user_id: UserId(model.user_id),
        fields: UserAbilityFields {
            mother_tongue_id: model.mother_tongue_id,
            bilingual_tongue_id: model.bilingual_tongue_id,
            main_clients: model.main_clients,
            qualifications: model.qualifications,
            years_of_experience: model.years_of_experience,
            quality_ensure_description: model.quality_ensure_description,
            capacity: Capacity {
                translation: model.translation_capacity,
                reviews: model.review_capacity,
                proofreading: model.proofreading_capacity,
            },
        },
        specializations,
        technology_knowledges,
        audit: audit_from_columns(
            model.active,
            model.created_by,
            model.created_at,
            model.updated_by,
            model.updated_at,
        ),
    })
}

async fn load_rate_items<C: ConnectionTrait>(
    conn: &C,
    rate_id: i32,
) -> Result<Vec<RateItem>, DomainError> {
    let rows = rate_items::Entity::find()
        .filter(rate_items::Column::UserRateId.eq(rate_id))
        .order_by_asc(rate_items::Column::Id)
        .all(conn)
        .await
        .map_err(db_error)?;

    Ok(rows.into_iter().map(|m| m.into()).collect())
}

async fn load_rate<C: ConnectionTrait>(
    conn: &C,
    model: user_rates::Model,
) -> Result<UserRate, DomainError> {
    let rate_items = load_rate_items(conn, model.id).await?;

    Ok(UserRate {
        id: UserRateId(model.id),
        user_id: UserId(model.user_id),
        fields: UserRateFields {
            dtp_rate: model.dtp_rate,
            glossary_creation_rate: model.glossary_creation_rate,
            linguistic_testing_rate: model.linguistic_testing_rate,
            review_lqa_rate: model.review_lqa_rate,
            review_sme_rate: model.review_sme_rate,
            terminology_extraction_rate: model.terminology_extraction_rate,
            translation_memory_management_rate: model.translation_memory_management_rate,
        },
        rate_items,
        audit: audit_from_columns(
            model.active,
            model.created_by,
            model.created_at,
            model.updated_by,
            model.updated_at,
        ),
    })
}

fn apply_contact(model: &mut user_contacts::ActiveModel, fields: &UserContactFields) {
    model.address = Set(fields.address.clone());
    model.alternative_email = Set(fields.alternative_email.clone());
    model.alternative_phone1 = Set(fields.alternative_phone1.clone());
    model.alternative_phone2 = Set(fields.alternative_phone2.clone());
    model.district_id = Set(fields.district_id);
    model.fax = Set(fields.fax.clone());
    model.postal_code = Set(fields.postal_code.clone());
    model.skype = Set(fields.skype.clone());
}

fn apply_ability(model: &mut user_abilities::ActiveModel, fields: &UserAbilityFields) {
    model.mother_tongue_id = Set(fields.mother_tongue_id);
    model.bilingual_tongue_id = Set(fields.bilingual_tongue_id);
    model.main_clients = Set(fields.main_clients.clone());
    model.qualifications = Set(fields.qualifications.clone());
    model.years_of_experience = Set(fields.years_of_experience);
    model.quality_ensure_description = Set(fields.quality_ensure_description.clone());
    model.translation_capacity = Set(fields.capacity.translation);
    model.review_capacity = Set(fields.capacity.reviews);
    model.proofreading_capacity = Set(fields.capacity.proofreading);
}

fn apply_knowledge(
    model: &mut technology_knowledges::ActiveModel,
    fields: &TechnologyKnowledgeFields,
) {
    model.operating_system = Set(fields.operating_system.clone());
    model.software_id = Set(fields.software_id);
    model.software_version = Set(fields.software_version.clone());
    model.rating = Set(fields.rating);
}

fn apply_payment(model: &mut user_payments::ActiveModel, fields: &UserPaymentFields) {
    let bank = &fields.bank_account;
    model.currency_id = Set(fields.currency_id);
    model.working_type_id = Set(fields.working_type_id);
    model.minimum_charge_amount = Set(fields.minimum_charge_amount);
    model.vat_tax_no = Set(fields.vat_tax_no.clone());
    model.account_holder_full_name = Set(bank.account_holder_full_name.clone());
    model.account_number = Set(bank.account_number.clone());
    model.bank_account_type_id = Set(bank.bank_account_type_id);
    model.bank_name = Set(bank.bank_name.clone());
    model.bank_address = Set(bank.bank_address.clone());
    model.beneficiary_address = Set(bank.beneficiary_address.clone());
    model.city_country_bank = Set(bank.city_country_bank.clone());
    model.iban = Set(bank.iban.clone());
    model.paypal_email_address = Set(bank.paypal_email_address.clone());
    model.swift_bic_code = Set(bank.swift_bic_code.clone());
}

fn apply_rate(model: &mut user_rates::ActiveModel, fields: &UserRateFields) {
    model.dtp_rate = Set(fields.dtp_rate);
    model.glossary_creation_rate = Set(fields.glossary_creation_rate);
    model.linguistic_testing_rate = Set(fields.linguistic_testing_rate);
    model.review_lqa_rate = Set(fields.review_lqa_rate);
    model.review_sme_rate = Set(fields.review_sme_rate);
    model.terminology_extraction_rate = Set(fields.terminology_extraction_rate);
    model.translation_memory_management_rate = Set(fields.translation_memory_management_rate);
}

fn apply_rate_item(model: &mut rate_items::ActiveModel, fields: &RateItemFields) {
    model.service_type_id = Set(fields.service_type_id);
    model.source_language_id = Set(fields.source_language_id.map(|id| id.0));
    model.target_language_id = Set(fields.target_language_id.map(|id| id.0));
    model.price = Set(fields.price);
    model.certificate_id = Set(fields.certificate_id);
    model.sworn_or_certified = Set(fields.sworn_or_certified);
}

/// Make the stored technology knowledges of an ability match the submitted list
async fn sync_knowledges<C: ConnectionTrait>(
    conn: &C,
    ability_id: i32,
    input: &UserAbilityInput,
    actor: UserId,
) -> Result<(), DomainError> {
    let existing: Vec<TechnologyKnowledgeId> = load_knowledges(conn, ability_id)
        .await?
        .into_iter()
        .map(|k| k.id)
        .collect();
    let plan = plan_child_sync(&existing, &input.technology_knowledges);

    if !plan.remove.is_empty() {
        technology_knowledges::Entity::delete_many()
            .filter(technology_knowledges::Column::Id.is_in(plan.remove.iter().map(|id| id.0)))
            .exec(conn)
            .await
            .map_err(db_error)?;
    }

    for (id, fields) in &plan.update {
        let mut model = technology_knowledges::ActiveModel {
            id: Set(id.0),
            ..Default::default()
        };
        apply_knowledge(&mut model, fields);
        model.update(conn).await.map_err(write_error)?;
    }

    for fields in &plan.insert {
        let mut model = technology_knowledges::ActiveModel {
            user_ability_id: Set(ability_id),
            active: Set(true),
            created_by: Set(actor.0),
            created_at: Set(now()),
            ..Default::default()
        };
        apply_knowledge(&mut model, fields);
        model.insert(conn).await.map_err(write_error)?;
    }

    Ok(())
}

async fn sync_specializations<C: ConnectionTrait>(
    conn: &C,
    ability_id: i32,
    wanted: &[TerminologyId],
    actor: UserId,
) -> Result<(), DomainError> {
    let existing = load_specializations(conn, ability_id).await?;
    let (insert, remove) = plan_id_sync(&existing, wanted);

    if !remove.is_empty() {
        user_specializations::Entity::delete_many()
            .filter(user_specializations::Column::UserAbilityId.eq(ability_id))
            .filter(user_specializations::Column::TerminologyId.is_in(remove.iter().map(|id| id.0)))
            .exec(conn)
            .await
            .map_err(db_error)?;
    }

    if !insert.is_empty() {
        let created_at = now();
        let rows = insert.iter().map(|terminology| user_specializations::ActiveModel {
            user_ability_id: Set(ability_id),
            terminology_id: Set(terminology.0),
            active: Set(true),
            created_by: Set(actor.0),
            created_at: Set(created_at),
            ..Default::default()
        });
        user_specializations::Entity::insert_many(rows)
            .exec(conn)
            .await
            .map_err(write_error)?;
    }

    Ok(())
}

async fn sync_rate_items<C: ConnectionTrait>(
    conn: &C,
    rate_id: i32,
    input: &UserRateInput,
    actor: UserId,
) -> Result<(), DomainError> {
    let existing: Vec<RateItemId> = load_rate_items(conn, rate_id)
        .await?
        .into_iter()
        .map(|i| i.id)
        .collect();
    let plan = plan_child_sync(&existing, &input.rate_items);

    if !plan.remove.is_empty() {
        rate_items::Entity::delete_many()
            .filter(rate_items::Column::Id.is_in(plan.remove.iter().map(|id| id.0)))
            .exec(conn)
            .await
            .map_err(db_error)?;
    }

    for (id, fields) in &plan.update {
        let mut model = rate_items::ActiveModel {
            id: Set(id.0),
            ..Default::default()
        };
        apply_rate_item(&mut model, fields);
        model.update(conn).await.map_err(write_error)?;
    }

    for fields in &plan.insert {
        let mut model = rate_items::ActiveModel {
            user_rate_id: Set(rate_id),
            active: Set(true),
            created_by: Set(actor.0),
            created_at: Set(now()),
            ..Default::default()
        };
        apply_rate_item(&mut model, fields);
        model.insert(conn).await.map_err(write_error)?;
    }

    Ok(())
}

// ============================================================================
// Repository
// ============================================================================

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        load_user(&self.db, id).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let Some(model) = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .order_by_desc(users::Column::Active)
            .order_by_asc(users::Column::Id)
            .one(&self.db)
            .await
            .map_err(db_error)?
        else {
            return Ok(None);
        };

        Ok(load_users(&self.db, vec![model]).await?.pop())
    }

    async fn find_all(&self, active: Option<bool>) -> Result<Vec<User>, DomainError> {
        let mut query = users::Entity::find();
        if let Some(active) = active {
            query = query.filter(users::Column::Active.eq(active));
        }

        let models = query
            .order_by_asc(users::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        load_users(&self.db, models).await
    }

    async fn find_by_role_types(&self, roles: &[UserRoleType]) -> Result<Vec<User>, DomainError> {
        let user_ids: Vec<i32> = user_roles::Entity::find()
            .select_only()
            .column(user_roles::Column::UserId)
            .filter(user_roles::Column::UserRoleTypeId.is_in(roles.iter().map(|r| r.id())))
            .filter(user_roles::Column::Active.eq(true))
            .distinct()
            .into_tuple::<i32>()
            .all(&self.db)
            .await
            .map_err(db_error)?;

        let models = users::Entity::find()
            .filter(users::Column::Id.is_in(user_ids))
            .order_by_asc(users::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        load_users(&self.db, models).await
    }

    async fn find_by_roles_and_score(
        &self,
        roles: &[UserRoleType],
        band: ScoreBand,
    ) -> Result<Vec<User>, DomainError> {
        let role_holders: Vec<i32> = user_roles::Entity::find()
            .select_only()
            .column(user_roles::Column::UserId)
            .filter(user_roles::Column::UserRoleTypeId.is_in(roles.iter().map(|r| r.id())))
            .filter(user_roles::Column::Active.eq(true))
            .distinct()
            .into_tuple::<i32>()
            .all(&self.db)
            .await
            .map_err(db_error)?;

        let in_band: Vec<i32> = user_scores::Entity::find()
            .select_only()
            .column(user_scores::Column::UserId)
            .filter(user_scores::Column::UserId.is_in(role_holders))
            .filter(user_scores::Column::AverageTranslatingScore.between(band.min, band.max))
            .into_tuple::<i32>()
            .all(&self.db)
            .await
            .map_err(db_error)?;

        let models = users::Entity::find()
            .filter(users::Column::Id.is_in(in_band))
            .order_by_asc(users::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        load_users(&self.db, models).await
    }

    async fn create(&self, user: &NewUser, actor: UserId) -> Result<User, DomainError> {
        let txn = self.db.begin().await.map_err(db_error)?;

        let model = users::ActiveModel {
            name: Set(user.fields.name.clone()),
            surname: Set(user.fields.surname.clone()),
            email: Set(user.fields.email.clone()),
            password: Set(user.password.clone()),
            password_retry_count: Set(0),
            mobile_phone: Set(user.fields.mobile_phone.clone()),
            gender_id: Set(user.fields.gender_id),
            birth_date: Set(user.fields.birth_date),
            active: Set(true),
            created_by: Set(actor.0),
            created_at: Set(now()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(write_error)?;

        insert_roles(&txn, model.id, &user.roles, actor).await?;
        txn.commit().await.map_err(db_error)?;

        load_user(&self.db, UserId(model.id))
            .await?
            .ok_or_else(|| DomainError::NotInserted(format!("user {}", model.id)))
    }

    async fn update(
        &self,
        id: UserId,
        fields: &UserFields,
        password: Option<&str>,
        roles: Option<&[UserRoleType]>,
        actor: UserId,
    ) -> Result<User, DomainError> {
        let txn = self.db.begin().await.map_err(db_error)?;

        let mut model = users::ActiveModel {
            id: Set(id.0),
            name: Set(fields.name.clone()),
            surname: Set(fields.surname.clone()),
            email: Set(fields.email.clone()),
            mobile_phone: Set(fields.mobile_phone.clone()),
            gender_id: Set(fields.gender_id),
            birth_date: Set(fields.birth_date),
            updated_by: Set(Some(actor.0)),
            updated_at: Set(Some(now())),
            ..Default::default()
        };
        if let Some(password) = password {
            model.password = Set(password.to_string());
        }
        model.update(&txn).await.map_err(write_error)?;

        if let Some(roles) = roles {
            user_roles::Entity::delete_many()
                .filter(user_roles::Column::UserId.eq(id.0))
                .exec(&txn)
                .await
                .map_err(db_error)?;
            insert_roles(&txn, id.0, roles, actor).await?;
        }

        txn.commit().await.map_err(db_error)?;

        load_user(&self.db, id).await?.ok_or_else(|| not_found(id))
    }

    async fn record_failed_login(
        &self,
        id: UserId,
        max_retry_count: i32,
    ) -> Result<Option<i32>, DomainError> {
        // Both SET expressions read the pre-update row
        let lock_out = Expr::case(
            Expr::col(users::Column::PasswordRetryCount).gte(max_retry_count - 1),
            false,
        )
        .finally(Expr::col(users::Column::Active));

        let updated = users::Entity::update_many()
            .col_expr(
                users::Column::PasswordRetryCount,
                Expr::col(users::Column::PasswordRetryCount).add(1),
            )
            .col_expr(users::Column::Active, lock_out.into())
            .filter(users::Column::Id.eq(id.0))
            .filter(users::Column::Active.eq(true))
            .exec_with_returning(&self.db)
            .await
            .map_err(db_error)?;

        Ok(updated.first().map(|u| u.password_retry_count))
    }

    async fn reset_retry_count(&self, id: UserId) -> Result<(), DomainError> {
        users::ActiveModel {
            id: Set(id.0),
            password_retry_count: Set(0),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(write_error)?;

        Ok(())
    }

    async fn update_password(&self, id: UserId, password: &str) -> Result<(), DomainError> {
        users::ActiveModel {
            id: Set(id.0),
            password: Set(password.to_string()),
            password_retry_count: Set(0),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(write_error)?;

        Ok(())
    }

    async fn set_active(
        &self,
        id: UserId,
        active: bool,
        actor: UserId,
    ) -> Result<User, DomainError> {
        users::ActiveModel {
            id: Set(id.0),
            active: Set(active),
            password_retry_count: Set(0),
            updated_by: Set(Some(actor.0)),
            updated_at: Set(Some(now())),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(write_error)?;

        load_user(&self.db, id).await?.ok_or_else(|| not_found(id))
    }

    async fn find_profile(&self, id: UserId) -> Result<Option<UserProfile>, DomainError> {
        let Some(user) = load_user(&self.db, id).await? else {
            return Ok(None);
        };

        let contact = user_contacts::Entity::find()
            .filter(user_contacts::Column::UserId.eq(id.0))
            .one(&self.db)
            .await
            .map_err(db_error)?
            .map(UserContact::from);

        let ability = match user_abilities::Entity::find()
            .filter(user_abilities::Column::UserId.eq(id.0))
            .one(&self.db)
            .await
            .map_err(db_error)?
        {
            Some(model) => Some(load_ability(&self.db, model).await?),
            None => None,
        };

        let payment = user_payments::Entity::find()
            .filter(user_payments::Column::UserId.eq(id.0))
            .one(&self.db)
            .await
            .map_err(db_error)?
            .map(UserPayment::from);

        let rate = match user_rates::Entity::find()
            .filter(user_rates::Column::UserId.eq(id.0))
            .one(&self.db)
            .await
            .map_err(db_error)?
        {
            Some(model) => Some(load_rate(&self.db, model).await?),
            None => None,
        };

        Ok(Some(UserProfile {
            user,
            contact,
            ability,
            payment,
            rate,
        }))
    }

    async fn save_contact(
        &self,
        user_id: UserId,
        fields: &UserContactFields,
        actor: UserId,
    ) -> Result<UserContact, DomainError> {
        require_user(&self.db, user_id).await?;

        let existing = user_contacts::Entity::find()
            .filter(user_contacts::Column::UserId.eq(user_id.0))
            .one(&self.db)
            .await
            .map_err(db_error)?;

        let saved = match existing {
            Some(row) => {
                let mut model = user_contacts::ActiveModel {
                    id: Set(row.id),
                    updated_by: Set(Some(actor.0)),
                    updated_at: Set(Some(now())),
                    ..Default::default()
                };
                apply_contact(&mut model, fields);
                model.update(&self.db).await
            }
            None => {
                let mut model = user_contacts::ActiveModel {
                    user_id: Set(user_id.0),
                    active: Set(true),
                    created_by: Set(actor.0),
                    created_at: Set(now()),
                    ..Default::default()
                };
                apply_contact(&mut model, fields);
                model.insert(&self.db).await
            }
        }
        .map_err(write_error)?;

        Ok(saved.into())
    }

    async fn save_ability(
        &self,
        user_id: UserId,
        input: &UserAbilityInput,
        actor: UserId,
    ) -> Result<UserAbility, DomainError> {
        let txn = self.db.begin().await.map_err(db_error)?;
        require_user(&txn, user_id).await?;

        let existing = user_abilities::Entity::find()
            .filter(user_abilities::Column::UserId.eq(user_id.0))
            .one(&txn)
            .await
            .map_err(db_error)?;

        let saved = match existing {
            Some(row) => {
                let mut model = user_abilities::ActiveModel {
                    id: Set(row.id),
                    updated_by: Set(Some(actor.0)),
                    updated_at: Set(Some(now())),
                    ..Default::default()
                };
                apply_ability(&mut model, &input.fields);
                model.update(&txn).await
            }
            None => {
                let mut model = user_abilities::ActiveModel {
                    user_id: Set(user_id.0),
                    active: Set(true),
                    created_by: Set(actor.0),
                    created_at: Set(now()),
                    ..Default::default()
                };
                apply_ability(&mut model, &input.fields);
                model.insert(&txn).await
            }
        }
        .map_err(write_error)?;

        sync_knowledges(&txn, saved.id, input, actor).await?;
        sync_specializations(&txn, saved.id, &input.specializations, actor).await?;

        let ability = load_ability(&txn, saved).await?;
        txn.commit().await.map_err(db_error)?;

        Ok(ability)
    }

    async fn save_payment(
        &self,
        user_id: UserId,
        fields: &UserPaymentFields,
        actor: UserId,
    ) -> Result<UserPayment, DomainError> {
        require_user(&self.db, user_id).await?;

        let existing = user_payments::Entity::find()
            .filter(user_payments::Column::UserId.eq(user_id.0))
            .one(&self.db)
            .await
            .map_err(db_error)?;

        let saved = match existing {
            Some(row) => {
                let mut model = user_payments::ActiveModel {
                    id: Set(row.id),
                    updated_by: Set(Some(actor.0)),
                    updated_at: Set(Some(now())),
                    ..Default::default()
                };
                apply_payment(&mut model, fields);
                model.update(&self.db).await
            }
            None => {
                let mut model = user_payments::ActiveModel {
                    user_id: Set(user_id.0),
                    active: Set(true),
                    created_by: Set(actor.0),
                    created_at: Set(now()),
                    ..Default::default()
                };
                apply_payment(&mut model, fields);
                model.insert(&self.db).await
            }
        }
        .map_err(write_error)?;

        Ok(saved.into())
    }

    async fn save_rate(
        &self,
        user_id: UserId,
        input: &UserRateInput,
        actor: UserId,
    ) -> Result<UserRate, DomainError> {
        let txn = self.db.begin().await.map_err(db_error)?;
        require_user(&txn, user_id).await?;

        let existing = user_rates::Entity::find()
            .filter(user_rates::Column::UserId.eq(user_id.0))
            .one(&txn)
            .await
            .map_err(db_error)?;

        let saved = match existing {
            Some(row) => {
                let mut model = user_rates::ActiveModel {
                    id: Set(row.id),
                    updated_by: Set(Some(actor.0)),
                    updated_at: Set(Some(now())),
                    ..Default::default()
                };
                apply_rate(&mut model, &input.fields);
                model.update(&txn).await
            }
            None => {
                let mut model = user_rates::ActiveModel {
                    user_id: Set(user_id.0),
                    active: Set(true),
                    created_by: Set(actor.0),
                    created_at: Set(now()),
                    ..Default::default()
                };
                apply_rate(&mut model, &input.fields);
                model.insert(&txn).await
            }
        }
        .map_err(write_error)?;

        sync_rate_items(&txn, saved.id, input, actor).await?;

        let rate = load_rate(&txn, saved).await?;
        txn.commit().await.map_err(db_error)?;

        Ok(rate)
    }

    async fn find_technology_knowledges(
        &self,
        ability_id: UserAbilityId,
    ) -> Result<Vec<TechnologyKnowledge>, DomainError> {
        load_knowledges(&self.db, ability_id.0).await
    }

    async fn find_rate_items(&self, rate_id: UserRateId) -> Result<Vec<RateItem>, DomainError> {
        load_rate_items(&self.db, rate_id.0).await
    }
}

// ============================================================================
// Model -> domain
// ============================================================================

impl From<user_contacts::Model> for UserContact {
    fn from(model: user_contacts::Model) -> Self {
        UserContact {
            id: UserContactId(model.id),
            user_id: UserId(model.user_id),
            fields: UserContactFields {
                address: model.address,
                alternative_email: model.alternative_email,
                alternative_phone1: model.alternative_phone1,
                alternative_phone2: model.alternative_phone2,
                district_id: model.district_id,
                fax: model.fax,
                postal_code: model.postal_code,
                skype: model.skype,
            },
            audit: audit_from_columns(
                model.active,
                model.created_by,
                model.created_at,
                model.updated_by,
                model.updated_at,
            ),
        }
    }
}

impl From<technology_knowledges::Model> for TechnologyKnowledge {
    fn from(model: technology_knowledges::Model) -> Self {
        TechnologyKnowledge {
            id: TechnologyKnowledgeId(model.id),
            user_ability_id: UserAbilityId(model.user_ability_id),
            fields: TechnologyKnowledgeFields {
                operating_system: model.operating_system,
                software_id: model.software_id,
                software_version: model.software_version,
                rating: model.rating,
            },
            active: model.active,
        }
    }
}

impl From<user_payments::Model> for UserPayment {
    fn from(model: user_payments::Model) -> Self {
        UserPayment {
            id: UserPaymentId(model.id),
            user_id: UserId(model.user_id),
            fields: UserPaymentFields {
                currency_id: model.currency_id,
                working_type_id: model.working_type_id,
                minimum_charge_amount: model.minimum_charge_amount,
                vat_tax_no: model.vat_tax_no,
                bank_account: BankAccount {
                    account_holder_full_name: model.account_holder_full_name,
                    account_number: model.account_number,
                    bank_account_type_id: model.bank_account_type_id,
                    bank_name: model.bank_name,
                    bank_address: model.bank_address,
                    beneficiary_address: model.beneficiary_address,
                    city_country_bank: model.city_country_bank,
                    iban: model.iban,
                    paypal_email_address: model.paypal_email_address,
                    swift_bic_code: model.swift_bic_code,
                },
            },
            audit: audit_from_columns(
                model.active,
                model.created_by,
                model.created_at,
                model.updated_by,
                model.updated_at,
            ),
        }
    }
}

impl From<rate_items::Model> for RateItem {
    fn from(model: rate_items::Model) -> Self {
        RateItem {
            id: RateItemId(model.id),
            user_rate_id: UserRateId(model.user_rate_id),
            fields: RateItemFields {
                service_type_id: model.service_type_id,
                source_language_id: model.source_language_id.map(LanguageId),
                target_language_id: model.target_language_id.map(LanguageId),
                price: model.price,
                certificate_id: model.certificate_id,
                sworn_or_certified: model.sworn_or_certified,
            },
            active: model.active,
        }
    }
}
