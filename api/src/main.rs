//! LinguaDesk API Server
//!
//! Back office of a translation agency: users and their profiles, staffing of
//! orders by translation quality, companies, customers, languages, price lists
//! and internal messaging.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use sea_orm::Database;
use serde::Serialize;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod auth;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{
    create_schema, PostgresCompanyRepository, PostgresCompanyTerminologyRepository,
    PostgresCustomerRepository, PostgresLanguageRepository, PostgresMessageRepository,
    PostgresOrderRepository, PostgresPriceListRepository, PostgresReferenceDataRepository,
    PostgresRepositories, PostgresTerminologyRepository, PostgresUserRepository,
};
use app::{
    AuthService, CompanyService, CustomerService, LanguageService, MessageService,
    PasswordHasher, PriceListService, ReferenceDataService, TerminologyService, UserService,
};
use config::Config;
use domain::entities::UserId;
use domain::ports::Repositories;
use handlers::{auth as login, catalogue, customers, messages, reference, users};

/// One instance of every repository port
pub struct RepositorySet<R: Repositories> {
    pub users: Arc<R::Users>,
    pub orders: Arc<R::Orders>,
    pub companies: Arc<R::Companies>,
    pub languages: Arc<R::Languages>,
    pub terminologies: Arc<R::Terminologies>,
    pub company_terminologies: Arc<R::CompanyTerminologies>,
    pub price_lists: Arc<R::PriceLists>,
    pub customers: Arc<R::Customers>,
    pub messages: Arc<R::Messages>,
    pub reference_data: Arc<R::ReferenceData>,
}

/// Application state shared across all handlers
pub struct AppState<R: Repositories> {
    pub auth_service: Arc<AuthService<R::Users>>,
    pub user_service: Arc<UserService<R::Users, R::Orders>>,
    pub company_service: Arc<CompanyService<R::Companies>>,
    pub language_service: Arc<LanguageService<R::Languages>>,
    pub terminology_service: Arc<TerminologyService<R::Terminologies, R::CompanyTerminologies>>,
    pub price_list_service: Arc<PriceListService<R::PriceLists>>,
    pub customer_service: Arc<CustomerService<R::Customers>>,
    pub message_service: Arc<MessageService<R::Messages>>,
    pub reference_service: Arc<ReferenceDataService<R::ReferenceData>>,
    /// Actor for requests without an `X-Actor-Id` header
    pub default_actor: UserId,
}

// Derived Clone would require `R: Clone`
impl<R: Repositories> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            auth_service: self.auth_service.clone(),
            user_service: self.user_service.clone(),
            company_service: self.company_service.clone(),
            language_service: self.language_service.clone(),
            terminology_service: self.terminology_service.clone(),
            price_list_service: self.price_list_service.clone(),
            customer_service: self.customer_service.clone(),
            message_service: self.message_service.clone(),
            reference_service: self.reference_service.clone(),
            default_actor: self.default_actor,
        }
    }
}

impl<R: Repositories> AppState<R> {
    pub fn new(repos: RepositorySet<R>, config: &Config) -> Self {
        let hasher = PasswordHasher::new(config.password_scheme, config.password_pepper.clone());

        Self {
            auth_service: Arc::new(AuthService::new(
                repos.users.clone(),
                hasher.clone(),
                config.password_retry_count,
            )),
            user_service: Arc::new(UserService::new(
                repos.users,
                repos.orders,
                hasher.clone(),
            )),
            company_service: Arc::new(CompanyService::new(repos.companies)),
            language_service: Arc::new(LanguageService::new(repos.languages)),
            terminology_service: Arc::new(TerminologyService::new(
                repos.terminologies,
                repos.company_terminologies,
            )),
            price_list_service: Arc::new(PriceListService::new(repos.price_lists)),
            customer_service: Arc::new(CustomerService::new(repos.customers, hasher)),
            message_service: Arc::new(MessageService::new(repos.messages)),
            reference_service: Arc::new(ReferenceDataService::new(repos.reference_data)),
            default_actor: config.default_actor_id,
        }
    }
}

/// Per-IP limit on the credential routes
#[derive(Debug, Clone, Copy)]
pub struct LoginRateLimit {
    pub per_second: u64,
    pub burst: u32,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

fn common_routes<R: Repositories>() -> Router<AppState<R>> {
    Router::new()
        // Messages
        .route("/addMessage", post(messages::add_message::<R>))
        .route(
            "/getIncomingMessagesByUser",
            get(messages::get_incoming_messages::<R>),
        )
        .route("/getSentMessagesByUser", get(messages::get_sent_messages::<R>))
        .route("/getMessage", get(messages::get_message::<R>))
        .route("/getMessageByQuery", post(messages::get_messages_by_query::<R>))
        .route(
            "/updateMessageForReadDate",
            get(messages::mark_message_read::<R>),
        )
        .route("/deleteSentMessage", get(messages::delete_sent_message::<R>))
        .route(
            "/deleteIncomingMessage",
            get(messages::delete_incoming_message::<R>),
        )
        // Companies
        .route("/getCompanies", get(catalogue::get_companies::<R>))
        .route("/getCompany", get(catalogue::get_company::<R>))
        .route("/addCompany", post(catalogue::add_company::<R>))
        .route("/editCompany", post(catalogue::edit_company::<R>))
        .route("/deleteCompany", post(catalogue::delete_company::<R>))
        .route("/setCompanyActive", post(catalogue::set_company_active::<R>))
        // Languages
        .route("/getLanguages", get(catalogue::get_languages::<R>))
        .route("/getLanguage", get(catalogue::get_language::<R>))
        .route("/addLanguage", post(catalogue::add_language::<R>))
        .route("/editLanguage", post(catalogue::edit_language::<R>))
        .route("/deleteLanguage", post(catalogue::delete_language::<R>))
        .route("/getTargetLanguages", get(catalogue::get_target_languages::<R>))
        .route(
            "/addSourceTargetLanguages",
            post(catalogue::add_source_target_language::<R>),
        )
        .route(
            "/deleteSourceTargetLanguages",
            post(catalogue::delete_source_target_language::<R>),
        )
        // Terminologies
        .route("/getTerminologies", get(catalogue::get_terminologies::<R>))
        .route("/getTerminology", get(catalogue::get_terminology::<R>))
        .route("/addTerminology", post(catalogue::add_terminology::<R>))
        .route("/editTerminology", post(catalogue::edit_terminology::<R>))
        .route("/deleteTerminology", post(catalogue::delete_terminology::<R>))
        // Price lists
        .route("/getPriceLists", get(catalogue::get_price_lists::<R>))
        .route("/getPriceList", get(catalogue::get_price_list::<R>))
        .route("/addPriceList", post(catalogue::add_price_list::<R>))
        .route("/editPriceList", post(catalogue::edit_price_list::<R>))
        .route("/deletePriceList", post(catalogue::delete_price_list::<R>))
        // Company terminologies
        .route(
            "/getCompanyTerminologies",
            get(catalogue::get_company_terminologies::<R>),
        )
        .route(
            "/getCompanyTerminology",
            get(catalogue::get_company_terminology::<R>),
        )
        .route(
            "/addCompanyTerminology",
            post(catalogue::add_company_terminology::<R>),
        )
        .route(
            "/editCompanyTerminology",
            post(catalogue::edit_company_terminology::<R>),
        )
        .route(
            "/deleteCompanyTerminology",
            post(catalogue::delete_company_terminology::<R>),
        )
        // Reference data
        .route("/getUserRoleTypes", get(reference::get_user_role_types::<R>))
        .route(
            "/getTranslationQualities",
            get(reference::get_translation_qualities::<R>),
        )
        .route("/getCountries", get(reference::get_countries::<R>))
        .route(
            "/getCitiesByCountryId",
            get(reference::get_cities_by_country::<R>),
        )
        .route(
            "/getDistrictByCityId",
            get(reference::get_districts_by_city::<R>),
        )
        .route("/getTongues", get(reference::get_tongues::<R>))
        .route("/getSpecializations", get(reference::get_specializations::<R>))
        .route("/getSoftwares", get(reference::get_softwares::<R>))
        .route(
            "/getBankAccountTypes",
            get(reference::get_bank_account_types::<R>),
        )
        .route("/getCurrencies", get(reference::get_currencies::<R>))
        .route("/getWorkingTypes", get(reference::get_working_types::<R>))
        .route("/getServiceTypes", get(reference::get_service_types::<R>))
}

fn user_routes<R: Repositories>() -> Router<AppState<R>> {
    Router::new()
        .route("/getUser", get(users::get_user::<R>))
        .route("/getUsers", get(users::get_users::<R>))
        .route(
            "/getUsersByRoleTypes",
            post(users::get_users_by_role_types::<R>),
        )
        .route("/addUser", post(users::add_user::<R>))
        .route("/editUser", post(users::edit_user::<R>))
        .route("/setActive", post(users::set_active::<R>))
        .route("/editUserContact", post(users::edit_user_contact::<R>))
        .route("/editUserAbility", post(users::edit_user_ability::<R>))
        .route("/editUserPayment", post(users::edit_user_payment::<R>))
        .route("/editUserRate", post(users::edit_user_rate::<R>))
        .route(
            "/getTechnologyKnowledgesByUserAbilityId",
            get(users::get_technology_knowledges::<R>),
        )
        .route(
            "/getRateItemsByUserRateId",
            get(users::get_rate_items::<R>),
        )
        .route(
            "/getTranslatorsAccordingToOrderTranslationQuality",
            get(users::get_translators_for_order::<R>),
        )
        .route(
            "/getEditorsAccordingToOrderTranslationQuality",
            get(users::get_editors_for_order::<R>),
        )
        .route(
            "/getProofReadersAccordingToOrderTranslationQuality",
            get(users::get_proof_readers_for_order::<R>),
        )
}

fn customer_routes<R: Repositories>() -> Router<AppState<R>> {
    Router::new()
        .route("/addCustomer", post(customers::add_customer::<R>))
        .route("/editCustomer", post(customers::edit_customer::<R>))
        .route("/getCustomers", get(customers::get_customers::<R>))
        .route("/getCustomer", get(customers::get_customer::<R>))
        .route(
            "/getCustomersByCompanyId",
            get(customers::get_customers_by_company::<R>),
        )
        .route("/setActive", post(customers::set_active::<R>))
}

/// Build the full router.
///
/// With a rate limit the server must be served with peer address connect
/// info, since the limiter keys on the client IP.
pub fn build_router<R: Repositories>(
    state: AppState<R>,
    login_limit: Option<LoginRateLimit>,
) -> anyhow::Result<Router> {
    // Credential routes, optionally rate limited
    let mut credential_routes = Router::new()
        .route("/login", post(login::login::<R>))
        .route("/changePassword", post(login::change_password::<R>));

    if let Some(limit) = login_limit {
        let governor_config = GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_second(limit.per_second)
            .burst_size(limit.burst)
            .finish()
            .ok_or_else(|| anyhow::anyhow!("invalid login rate limit {:?}", limit))?;

        credential_routes = credential_routes.layer(GovernorLayer {
            config: Arc::new(governor_config),
        });
    }

    let api = Router::new()
        .nest("/commonapi", common_routes::<R>().merge(credential_routes))
        .nest("/userapi", user_routes::<R>())
        .nest("/customerapi", customer_routes::<R>())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::actor_middleware::<R>,
        ));

    Ok(Router::new()
        // Health check (no actor)
        .route("/health", get(health))
        .nest("/api", api)
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,linguadesk_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting LinguaDesk API...");

    // Load configuration
    let config = Config::from_env()?;

    // Connect to PostgreSQL
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url).await?;
    tracing::info!("Database connected");

    if config.auto_create_schema {
        create_schema(&db).await?;
    }

    // Create adapters
    let repos = RepositorySet::<PostgresRepositories> {
        users: Arc::new(PostgresUserRepository::new(db.clone())),
        orders: Arc::new(PostgresOrderRepository::new(db.clone())),
        companies: Arc::new(PostgresCompanyRepository::new(db.clone())),
        languages: Arc::new(PostgresLanguageRepository::new(db.clone())),
        terminologies: Arc::new(PostgresTerminologyRepository::new(db.clone())),
        company_terminologies: Arc::new(PostgresCompanyTerminologyRepository::new(db.clone())),
        price_lists: Arc::new(PostgresPriceListRepository::new(db.clone())),
        customers: Arc::new(PostgresCustomerRepository::new(db.clone())),
        messages: Arc::new(PostgresMessageRepository::new(db.clone())),
        reference_data: Arc::new(PostgresReferenceDataRepository::new(db)),
    };

    let state = AppState::new(repos, &config);

    let app = build_router(
        state,
        Some(LoginRateLimit {
            per_second: config.login_rate_per_second,
            burst: config.login_rate_burst,
        }),
    )?;

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
