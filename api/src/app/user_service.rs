//! User service
//!
//! User administration, profile sections and staffing of orders by role and
//! score tier.

use std::sync::{Arc, OnceLock};

use regex::Regex;

use crate::app::password::PasswordHasher;
use crate::domain::entities::{
    NewUser, OrderId, RateItem, RoleGroup, TechnologyKnowledge, TranslationQuality, User,
    UserAbility, UserAbilityId, UserAbilityInput, UserContact, UserContactInput, UserId,
    UserPayment, UserPaymentInput, UserProfile, UserRate, UserRateId, UserRateInput, UserRoleType,
    UserUpdate,
};
use crate::domain::ports::{OrderRepository, UserRepository};
use crate::error::AppError;

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

fn is_valid_email(email: &str) -> bool {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(EMAIL_PATTERN).ok())
        .as_ref()
        .map_or(false, |re| re.is_match(email))
}

pub struct UserService<UR, OR>
where
    UR: UserRepository,
    OR: OrderRepository,
{
    users: Arc<UR>,
    orders: Arc<OR>,
    hasher: PasswordHasher,
}

impl<UR, OR> UserService<UR, OR>
where
    UR: UserRepository,
    OR: OrderRepository,
{
    pub fn new(users: Arc<UR>, orders: Arc<OR>, hasher: PasswordHasher) -> Self {
        Self {
            users,
            orders,
            hasher,
        }
    }

    /// Active user by ID; used to authenticate the acting user
    pub async fn find_active(&self, id: UserId) -> Result<Option<User>, AppError> {
        Ok(self.users.find_by_id(id).await?.filter(|u| u.is_active()))
    }

    pub async fn get_user(&self, id: UserId) -> Result<UserProfile, AppError> {
        self.users
            .find_profile(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user {}", id)))
    }

    pub async fn list_users(&self, active: Option<bool>) -> Result<Vec<User>, AppError> {
        Ok(self.users.find_all(active).await?)
    }

    pub async fn users_by_role_types(&self, roles: &[UserRoleType]) -> Result<Vec<User>, AppError> {
        if roles.is_empty() {
            return Err(AppError::BadRequest("no role types given".to_string()));
        }
        Ok(self.users.find_by_role_types(roles).await?)
    }

    /// Create a user. An email held by an active user yields a warning.
    pub async fn add_user(&self, new_user: NewUser, actor: UserId) -> Result<User, AppError> {
        let mut new_user = new_user;
        new_user.fields.email = new_user.fields.email.trim().to_string();
        let email = &new_user.fields.email;

        if !is_valid_email(email) {
            return Err(AppError::BadRequest(format!("invalid email {}", email)));
        }
        if new_user.password.is_empty() {
            return Err(AppError::BadRequest("password is empty".to_string()));
        }
        if self.email_taken(email, None).await? {
            return Err(AppError::EmailIsUsed(email.clone()));
        }

        new_user.password = self.hasher.hash(&new_user.password)?;

        let user = self.users.create(&new_user, actor).await?;
        tracing::info!(user_id = %user.id, created_by = %actor, "User added");
        Ok(user)
    }

    /// Apply the whitelisted changes of an edit request
    pub async fn edit_user(
        &self,
        id: UserId,
        update: UserUpdate,
        actor: UserId,
    ) -> Result<User, AppError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user {}", id)))?;

        let mut fields = update.fields;
        fields.email = fields.email.trim().to_string();
        if !is_valid_email(&fields.email) {
            return Err(AppError::BadRequest(format!("invalid email {}", fields.email)));
        }
        if self.email_taken(&fields.email, Some(id)).await? {
            return Err(AppError::EmailIsUsed(fields.email));
        }

        let password = update
            .password
            .filter(|p| !p.is_empty())
            .map(|p| self.hasher.hash(&p))
            .transpose()?;
        let roles = (!update.roles.is_empty()).then_some(update.roles.as_slice());

        Ok(self
            .users
            .update(id, &fields, password.as_deref(), roles, actor)
            .await?)
    }

    /// Administrative (de)activation; also clears a lockout
    pub async fn set_active(
        &self,
        id: UserId,
        active: bool,
        actor: UserId,
    ) -> Result<User, AppError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user {}", id)))?;

        let user = self.users.set_active(id, active, actor).await?;
        tracing::info!(user_id = %id, active, changed_by = %actor, "User activation changed");
        Ok(user)
    }

    pub async fn save_contact(
        &self,
        user_id: UserId,
        input: UserContactInput,
        actor: UserId,
    ) -> Result<UserContact, AppError> {
        let profile = self.get_user(user_id).await?;
        check_section_id(input.id, profile.contact.map(|c| c.id), "user contact")?;
        Ok(self.users.save_contact(user_id, &input.fields, actor).await?)
    }

    pub async fn save_ability(
        &self,
        user_id: UserId,
        input: UserAbilityInput,
        actor: UserId,
    ) -> Result<UserAbility, AppError> {
        let profile = self.get_user(user_id).await?;
        check_section_id(input.id, profile.ability.map(|a| a.id), "user ability")?;
        Ok(self.users.save_ability(user_id, &input, actor).await?)
    }

    pub async fn save_payment(
        &self,
        user_id: UserId,
        input: UserPaymentInput,
        actor: UserId,
    ) -> Result<UserPayment, AppError> {
        let profile = self.get_user(user_id).await?;
        check_section_id(input.id, profile.payment.map(|p| p.id), "user payment")?;
        Ok(self.users.save_payment(user_id, &input.fields, actor).await?)
    }

    pub async fn save_rate(
        &self,
        user_id: UserId,
        input: UserRateInput,
        actor: UserId,
    ) -> Result<UserRate, AppError> {
        let profile = self.get_user(user_id).await?;
        check_section_id(input.id, profile.rate.map(|r| r.id), "user rate")?;
        Ok(self.users.save_rate(user_id, &input, actor).await?)
    }

    pub async fn technology_knowledges(
        &self,
        ability_id: UserAbilityId,
    ) -> Result<Vec<TechnologyKnowledge>, AppError> {
        Ok(self.users.find_technology_knowledges(ability_id).await?)
    }

    pub async fn rate_items(&self, rate_id: UserRateId) -> Result<Vec<RateItem>, AppError> {
        Ok(self.users.find_rate_items(rate_id).await?)
    }

    pub async fn translators_for_order(&self, order_id: OrderId) -> Result<Vec<User>, AppError> {
        self.users_for_order(order_id, RoleGroup::Translators).await
    }

    pub async fn editors_for_order(&self, order_id: OrderId) -> Result<Vec<User>, AppError> {
        self.users_for_order(order_id, RoleGroup::Editors).await
    }

    pub async fn proof_readers_for_order(&self, order_id: OrderId) -> Result<Vec<User>, AppError> {
        self.users_for_order(order_id, RoleGroup::ProofReaders).await
    }

    /// Users of the group whose translating score fits the order's tier
    async fn users_for_order(
        &self,
        order_id: OrderId,
        group: RoleGroup,
    ) -> Result<Vec<User>, AppError> {
        let order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or(AppError::OrderNotFound(order_id))?;

        let quality =
            TranslationQuality::try_from(order.translation_quality_id).map_err(AppError::BadRequest)?;

        let users = self
            .users
            .find_by_roles_and_score(group.roles(), quality.score_band())
            .await?;

        if users.is_empty() {
            return Err(AppError::NoMatchingUsers { group, order_id });
        }

        tracing::debug!(
            order_id = %order_id,
            quality = quality.name(),
            group = %group,
            count = users.len(),
            "Matched users for order"
        );
        Ok(users)
    }

    async fn email_taken(&self, email: &str, except: Option<UserId>) -> Result<bool, AppError> {
        Ok(self
            .users
            .find_by_email(email)
            .await?
            .is_some_and(|u| u.is_active() && Some(u.id) != except))
    }
}

/// A submitted section id must match the stored one; no id means "create or
/// overwrite the user's section".
fn check_section_id<I>(given: Option<I>, stored: Option<I>, what: &str) -> Result<(), AppError>
where
    I: PartialEq + std::fmt::Display,
{
    match given {
        Some(id) if stored.as_ref() != Some(&id) => {
            Err(AppError::NotFound(format!("{} {}", what, id)))
        }
        _ => Ok(()),
    }
}
