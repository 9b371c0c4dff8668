use core_config::{
    AppInfo, ConfigError, FromEnv, app_info, env_or_default, env_parse_or, server::ServerConfig,
};
use database::mongodb::MongoConfig;
use domain_users::MongoUserRepository;
use std::time::Duration;

pub use core_config::Environment;

/// Settings for the users collection.
#[derive(Clone, Debug)]
pub struct UsersConfig {
    pub collection: String,
    /// Deadline applied to every MongoDB call made by the user store
    pub operation_timeout: Duration,
}

impl FromEnv for UsersConfig {
    /// - `USERS_COLLECTION`: defaults to `users`
    /// - `USERS_OPERATION_TIMEOUT_MS`: defaults to 5000
    fn from_env() -> Result<Self, ConfigError> {
        let default_timeout = MongoUserRepository::DEFAULT_OPERATION_TIMEOUT.as_millis() as u64;

        Ok(Self {
            collection: env_or_default("USERS_COLLECTION", MongoUserRepository::DEFAULT_COLLECTION),
            operation_timeout: Duration::from_millis(env_parse_or(
                "USERS_OPERATION_TIMEOUT_MS",
                default_timeout,
            )?),
        })
    }
}

/// Application configuration, composed from the shared config components.
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub users: UsersConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Ok(Self {
            app: app_info!(),
            mongodb: MongoConfig::from_env()?,
            server: ServerConfig::from_env()?,
            users: UsersConfig::from_env()?,
            environment: Environment::from_env(),
        })
    }
}
