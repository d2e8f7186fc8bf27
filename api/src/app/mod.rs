//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities and repository ports.

pub mod auth_service;
pub mod company_service;
pub mod customer_service;
pub mod language_service;
pub mod message_service;
pub mod password;
pub mod price_list_service;
pub mod reference_service;
pub mod terminology_service;
pub mod user_service;

pub use auth_service::AuthService;
pub use company_service::CompanyService;
pub use customer_service::CustomerService;
pub use language_service::LanguageService;
pub use message_service::MessageService;
pub use password::{PasswordHasher, PasswordScheme};
pub use price_list_service::PriceListService;
pub use reference_service::ReferenceDataService;
pub use terminology_service::TerminologyService;
pub use user_service::UserService;
