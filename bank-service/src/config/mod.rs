use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct BankConfig {
    pub common: core_config::Config,
    pub environment: Environment,
    pub service_name: String,
    pub service_version: String,
    pub log_level: String,
    /// When set, spans are exported over OTLP.
    pub otlp_endpoint: Option<String>,
    pub store: StoreBackend,
    pub mongodb: MongoConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Dev,
    Prod,
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Ok(Environment::Dev),
            "prod" | "production" => Ok(Environment::Prod),
            other => Err(format!("Unknown environment '{}'", other)),
        }
    }
}

/// Which record store backs the API.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StoreBackend {
    Mongodb,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(StoreBackend::Mongodb),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(format!("Unknown store backend '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub uri: Secret<String>,
    pub database: String,
    pub collection: String,
    pub connect_timeout: Duration,
    pub operation_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub max_age: Duration,
}

impl BankConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        Self::from_lookup(common_config, |key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment: Environment = lookup("ENVIRONMENT")
            .unwrap_or_else(|| "dev".to_string())
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;
        let is_prod = environment == Environment::Prod;

        let store: StoreBackend = get_env(&lookup, "BANK_STORE", Some("mongodb"), false)?
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;

        Ok(BankConfig {
            common,
            environment,
            service_name: get_env(&lookup, "SERVICE_NAME", Some("bank-service"), false)?,
            service_version: get_env(
                &lookup,
                "SERVICE_VERSION",
                Some(env!("CARGO_PKG_VERSION")),
                false,
            )?,
            log_level: get_env(&lookup, "LOG_LEVEL", Some("info"), false)?,
            otlp_endpoint: lookup("OTLP_ENDPOINT").filter(|v| !v.is_empty()),
            store,
            mongodb: MongoConfig {
                uri: Secret::new(get_env(
                    &lookup,
                    "MONGODB_URI",
                    Some("mongodb://localhost:27017"),
                    is_prod,
                )?),
                database: get_env(&lookup, "MONGODB_DATABASE", Some("bank_app_db"), is_prod)?,
                collection: get_env(&lookup, "MONGODB_COLLECTION", Some("bank_details"), false)?,
                connect_timeout: parse_seconds(
                    "MONGODB_CONNECT_TIMEOUT_SECONDS",
                    &get_env(&lookup, "MONGODB_CONNECT_TIMEOUT_SECONDS", Some("10"), false)?,
                )?,
                operation_timeout: parse_seconds(
                    "MONGODB_OPERATION_TIMEOUT_SECONDS",
                    &get_env(&lookup, "MONGODB_OPERATION_TIMEOUT_SECONDS", Some("5"), false)?,
                )?,
            },
            cors: CorsConfig {
                allowed_origins: parse_origins(&get_env(
                    &lookup,
                    "CORS_ALLOWED_ORIGINS",
                    Some("http://localhost:5173"),
                    is_prod,
                )?)?,
                max_age: parse_seconds(
                    "CORS_MAX_AGE_SECONDS",
                    &get_env(&lookup, "CORS_MAX_AGE_SECONDS", Some("43200"), false)?,
                )?,
            },
        })
    }
}

fn get_env<F>(lookup: &F, key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(val) => Ok(val),
        None => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

fn parse_seconds(key: &str, value: &str) -> Result<Duration, AppError> {
    let secs: u64 = value.trim().parse().map_err(|e: std::num::ParseIntError| {
        AppError::ConfigError(anyhow::anyhow!("{} must be a whole number of seconds: {}", key, e))
    })?;
    if secs == 0 {
        return Err(AppError::ConfigError(anyhow::anyhow!(
            "{} must be greater than zero",
            key
        )));
    }
    Ok(Duration::from_secs(secs))
}

/// Comma-separated list of explicit origins. Credentials are allowed, so `*` is rejected.
fn parse_origins(value: &str) -> Result<Vec<String>, AppError> {
    let origins: Vec<String> = value
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect();

    if origins.is_empty() {
        return Err(AppError::ConfigError(anyhow::anyhow!(
            "CORS_ALLOWED_ORIGINS must list at least one origin"
        )));
    }
    if origins.iter().any(|o| o == "*") {
        return Err(AppError::ConfigError(anyhow::anyhow!(
            "CORS_ALLOWED_ORIGINS cannot contain '*' when credentials are allowed"
        )));
    }
    Ok(origins)
}
