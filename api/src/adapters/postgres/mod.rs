//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod company_repo;
pub mod company_terminology_repo;
pub mod customer_repo;
pub mod language_repo;
pub mod message_repo;
pub mod order_repo;
pub mod price_list_repo;
pub mod reference_repo;
pub mod terminology_repo;
pub mod user_repo;


pub use company_repo::PostgresCompanyRepository;
pub use company_terminology_repo::PostgresCompanyTerminologyRepository;
pub use customer_repo::PostgresCustomerRepository;
pub use language_repo::PostgresLanguageRepository;
pub use message_repo::PostgresMessageRepository;
pub use order_repo::PostgresOrderRepository;
pub use price_list_repo::PostgresPriceListRepository;
pub use reference_repo::PostgresReferenceDataRepository;
pub use terminology_repo::PostgresTerminologyRepository;
pub use user_repo::PostgresUserRepository;

use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, Schema};

use crate::domain::entities::{Audit, UserId};
use crate::domain::ports::Repositories;
use crate::entity::{
    companies, company_terminologies, customers, languages, messages, orders, price_lists,
    rate_items, reference_items, source_target_languages, technology_knowledges, terminologies,
    user_abilities, user_contacts, user_payments, user_rates, user_roles, user_scores,
    user_specializations, users,
};
use crate::error::DomainError;

/// Binds every port to its SeaORM implementation
pub struct PostgresRepositories;

impl Repositories for PostgresRepositories {
    type Users = PostgresUserRepository;
    type Orders = PostgresOrderRepository;
    type Companies = PostgresCompanyRepository;
    type Languages = PostgresLanguageRepository;
    type Terminologies = PostgresTerminologyRepository;
    type CompanyTerminologies = PostgresCompanyTerminologyRepository;
    type PriceLists = PostgresPriceListRepository;
    type Customers = PostgresCustomerRepository;
    type Messages = PostgresMessageRepository;
    type ReferenceData = PostgresReferenceDataRepository;
}

/// Map a failed write. Zero affected rows become `NotInserted` / `NotFound`.
pub(crate) fn write_error(e: DbErr) -> DomainError {
    match e {
        DbErr::RecordNotInserted => DomainError::NotInserted(e.to_string()),
        DbErr::RecordNotUpdated => DomainError::NotFound(e.to_string()),
        other => DomainError::Database(other.to_string()),
    }
}

/// Build the domain audit block from the five audit columns
pub(crate) fn audit_from_columns(
    active: bool,
    created_by: i32,
    created_at: DateTimeWithTimeZone,
    updated_by: Option<i32>,
    updated_at: Option<DateTimeWithTimeZone>,
) -> Audit {
    Audit {
        active,
        created_by: UserId(created_by),
        created_at: created_at.with_timezone(&Utc),
        updated_by: updated_by.map(UserId),
        updated_at: updated_at.map(|t| t.with_timezone(&Utc)),
    }
}

pub(crate) fn now() -> DateTimeWithTimeZone {
    Utc::now().fixed_offset()
}

/// Create any missing table from the entity definitions.
///
/// Only meant for development databases; existing tables are left untouched.
pub async fn create_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let statements = [
        schema.create_table_from_entity(users::Entity),
        schema.create_table_from_entity(user_roles::Entity),
        schema.create_table_from_entity(user_scores::Entity),
        schema.create_table_from_entity(user_contacts::Entity),
        schema.create_table_from_entity(user_abilities::Entity),
        schema.create_table_from_entity(user_specializations::Entity),
        schema.create_table_from_entity(technology_knowledges::Entity),
        schema.create_table_from_entity(user_payments::Entity),
        schema.create_table_from_entity(user_rates::Entity),
        schema.create_table_from_entity(rate_items::Entity),
        schema.create_table_from_entity(orders::Entity),
        schema.create_table_from_entity(companies::Entity),
        schema.create_table_from_entity(languages::Entity),
        schema.create_table_from_entity(source_target_languages::Entity),
        schema.create_table_from_entity(terminologies::Entity),
        schema.create_table_from_entity(company_terminologies::Entity),
        schema.create_table_from_entity(price_lists::Entity),
        schema.create_table_from_entity(customers::Entity),
        schema.create_table_from_entity(messages::Entity),
        schema.create_table_from_entity(reference_items::Entity),
    ];

    for mut statement in statements {
        statement.if_not_exists();
        db.execute(backend.build(&statement)).await?;
    }

    tracing::info!("Database schema ensured");
    Ok(())
}
