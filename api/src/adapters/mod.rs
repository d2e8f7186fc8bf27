//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod postgres;

pub use postgres::{
    create_schema, PostgresCompanyRepository, PostgresCompanyTerminologyRepository,
    PostgresCustomerRepository, PostgresLanguageRepository, PostgresMessageRepository,
    PostgresOrderRepository, PostgresPriceListRepository, PostgresReferenceDataRepository,
    PostgresRepositories, PostgresTerminologyRepository, PostgresUserRepository,
};
