use std::env;
use std::str::FromStr;

use anyhow::{bail, Context};

use crate::app::PasswordScheme;
use crate::domain::entities::UserId;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Failed logins allowed before the account is deactivated
    pub password_retry_count: i32,
    pub password_scheme: PasswordScheme,
    /// Argon2 secret mixed into every password hash
    pub password_pepper: String,
    /// Actor stamped on writes that carry no `X-Actor-Id` header
    pub default_actor_id: UserId,
    /// Create missing tables from the entity definitions on startup
    pub auto_create_schema: bool,
    pub login_rate_per_second: u64,
    pub login_rate_burst: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let password_scheme = env::var("PASSWORD_SCHEME")
            .unwrap_or_else(|_| "argon2id".to_string())
            .parse()
            .map_err(anyhow::Error::msg)?;

        let config = Self {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            port: env_or("PORT", 8080)?,
            password_retry_count: env_or("PASSWORD_RETRY_COUNT", 3)?,
            password_scheme,
            password_pepper: env::var("PASSWORD_PEPPER")
                .unwrap_or_else(|_| "dev-pepper-not-for-production".to_string()),
            default_actor_id: UserId(env_or("DEFAULT_ACTOR_ID", 1)?),
            auto_create_schema: env_or("AUTO_CREATE_SCHEMA", false)?,
            login_rate_per_second: env_or("LOGIN_RATE_PER_SECOND", 2)?,
            login_rate_burst: env_or("LOGIN_RATE_BURST", 5)?,
        };
        config.validate()?;

        Ok(config)
    }

    /// Reject values that parse but cannot work
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.port == 0 {
            bail!("PORT must be between 1 and 65535");
        }
        if self.password_retry_count < 1 {
            bail!(
                "PASSWORD_RETRY_COUNT must be at least 1, got {}",
                self.password_retry_count
            );
        }
        if self.login_rate_per_second == 0 || self.login_rate_burst == 0 {
            bail!("LOGIN_RATE_PER_SECOND and LOGIN_RATE_BURST must be at least 1");
        }
        Ok(())
    }
}

fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    parse_or(key, env::var(key).ok(), default)
}

/// Unset means the default; a set but malformed value is an error
fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {:?}", key, value)),
    }
}
