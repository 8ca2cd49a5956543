//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when present).

use serde::Deserialize;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub redis: Option<RedisConfig>,
    pub tally: TallyConfig,
    pub ens: EnsConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
}

impl Default for AppConfig {
    /// Configuration with every variable unset
    fn default() -> Self {
        Self {
            app: AppSettings::default(),
            server: ServerConfig::default(),
            auth: AuthConfig::default(),
            redis: None,
            tally: TallyConfig::default(),
            ens: EnsConfig::default(),
            rate_limit: RateLimitConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            env: default_env(),
        }
    }
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Prefix every route is mounted under
    #[serde(default = "default_route_prefix")]
    pub route_prefix: String,
    /// Upper bound for a single request, including a full synchronous refresh
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            route_prefix: default_route_prefix(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Bearer-token authorization for the HTTP surface
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    /// Expected token; when unset any non-empty bearer token is accepted
    pub bearer_token: Option<String>,
}

/// Redis configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    #[serde(default = "default_redis_max_connections")]
    pub max_connections: u32,
}

/// Tally GraphQL API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TallyConfig {
    pub api_key: Option<String>,
    #[serde(default = "default_tally_api_url")]
    pub api_url: String,
    #[serde(default = "default_governor_id")]
    pub governor_id: String,
    #[serde(default = "default_proposal_limit")]
    pub proposal_limit: u32,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Base wait after a 429; doubled for every attempt
    #[serde(default = "default_rate_limit_backoff")]
    pub rate_limit_backoff_ms: u64,
    /// Fixed wait after a transport failure
    #[serde(default = "default_transport_backoff")]
    pub transport_backoff_ms: u64,
    /// Pause before every vote fetch after the first
    #[serde(default = "default_vote_fetch_interval")]
    pub vote_fetch_interval_ms: u64,
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,
}

impl TallyConfig {
    #[must_use]
    pub fn rate_limit_backoff(&self) -> Duration {
        Duration::from_millis(self.rate_limit_backoff_ms)
    }

    #[must_use]
    pub fn transport_backoff(&self) -> Duration {
        Duration::from_millis(self.transport_backoff_ms)
    }

    #[must_use]
    pub fn vote_fetch_interval(&self) -> Duration {
        Duration::from_millis(self.vote_fetch_interval_ms)
    }

    #[must_use]
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

impl Default for TallyConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: default_tally_api_url(),
            governor_id: default_governor_id(),
            proposal_limit: default_proposal_limit(),
            max_retries: default_max_retries(),
            rate_limit_backoff_ms: default_rate_limit_backoff(),
            transport_backoff_ms: default_transport_backoff(),
            vote_fetch_interval_ms: default_vote_fetch_interval(),
            http_timeout_secs: default_http_timeout(),
        }
    }
}

/// ENS name resolution configuration (Ethereum mainnet JSON-RPC)
#[derive(Debug, Clone, Deserialize)]
pub struct EnsConfig {
    /// Alchemy API key; resolution is skipped when unset
    pub api_key: Option<String>,
    /// RPC base URL, the API key is appended as the last path segment
    #[serde(default = "default_ens_rpc_url")]
    pub rpc_url: String,
    #[serde(default = "default_ens_registry")]
    pub registry_address: String,
    /// A pause is inserted before every `batch_size`-th lookup
    #[serde(default = "default_lookup_batch_size")]
    pub lookup_batch_size: usize,
    #[serde(default = "default_lookup_pause")]
    pub lookup_pause_ms: u64,
}

impl EnsConfig {
    /// Full RPC endpoint, if a key is configured
    #[must_use]
    pub fn endpoint(&self) -> Option<String> {
        self.api_key
            .as_ref()
            .map(|key| format!("{}/{}", self.rpc_url.trim_end_matches('/'), key))
    }

    #[must_use]
    pub fn lookup_pause(&self) -> Duration {
        Duration::from_millis(self.lookup_pause_ms)
    }
}

impl Default for EnsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            rpc_url: default_ens_rpc_url(),
            registry_address: default_ens_registry(),
            lookup_batch_size: default_lookup_batch_size(),
            lookup_pause_ms: default_lookup_pause(),
        }
    }
}

/// Rate limiting configuration for the HTTP surface
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_second: default_requests_per_second(),
            burst: default_burst(),
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorsConfig {
    /// Allowed origins; empty means any origin
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

// Default value functions
fn default_app_name() -> String {
    "voter-leaderboard".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_route_prefix() -> String {
    "/api/v1".to_string()
}

fn default_request_timeout() -> u64 {
    300
}

fn default_redis_max_connections() -> u32 {
    10
}

fn default_tally_api_url() -> String {
    "https://api.withtally.com/query".to_string()
}

fn default_governor_id() -> String {
    // Unlock Protocol governor on Base
    "eip155:8453:0x65bA0624403Fc5Ca2b20479e9F626eD4D78E0aD9".to_string()
}

fn default_proposal_limit() -> u32 {
    10
}

fn default_max_retries() -> u32 {
    3
}

fn default_rate_limit_backoff() -> u64 {
    3000
}

fn default_transport_backoff() -> u64 {
    2000
}

fn default_vote_fetch_interval() -> u64 {
    4000
}

fn default_http_timeout() -> u64 {
    30
}

fn default_ens_rpc_url() -> String {
    "https://eth-mainnet.g.alchemy.com/v2".to_string()
}

fn default_ens_registry() -> String {
    "0x00000000000C2E074eC69A0dFb2997BA6C7d2e1e".to_string()
}

fn default_lookup_batch_size() -> usize {
    5
}

fn default_lookup_pause() -> u64 {
    500
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a variable is set to a value that cannot be parsed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_source(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    ///
    /// # Errors
    /// Returns an error if a variable is set to a value that cannot be parsed
    pub fn from_source<F>(source: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| source(key).filter(|value| !value.trim().is_empty());

        Ok(Self {
            app: AppSettings {
                name: var("APP_NAME").unwrap_or_else(default_app_name),
                env: var("APP_ENV")
                    .and_then(|s| Environment::parse(&s))
                    .unwrap_or_default(),
            },
            server: ServerConfig {
                host: var("API_HOST").unwrap_or_else(default_host),
                port: parse_or(&var, "API_PORT", default_port)?,
                route_prefix: var("API_ROUTE_PREFIX")
                    .map(|prefix| normalize_prefix(&prefix))
                    .unwrap_or_else(default_route_prefix),
                request_timeout_secs: parse_or(&var, "REQUEST_TIMEOUT_SECS", default_request_timeout)?,
            },
            auth: AuthConfig {
                bearer_token: var("API_BEARER_TOKEN"),
            },
            redis: match var("REDIS_URL") {
                Some(url) => Some(RedisConfig {
                    url,
                    max_connections: parse_or(
                        &var,
                        "REDIS_MAX_CONNECTIONS",
                        default_redis_max_connections,
                    )?,
                }),
                None => None,
            },
            tally: TallyConfig {
                api_key: var("TALLY_API_KEY"),
                api_url: var("TALLY_API_URL").unwrap_or_else(default_tally_api_url),
                governor_id: var("TALLY_GOVERNOR_ID").unwrap_or_else(default_governor_id),
                proposal_limit: parse_or(&var, "TALLY_PROPOSAL_LIMIT", default_proposal_limit)?,
                max_retries: parse_or(&var, "TALLY_MAX_RETRIES", default_max_retries)?,
                rate_limit_backoff_ms: parse_or(
                    &var,
                    "TALLY_RATE_LIMIT_BACKOFF_MS",
                    default_rate_limit_backoff,
                )?,
                transport_backoff_ms: parse_or(
                    &var,
                    "TALLY_TRANSPORT_BACKOFF_MS",
                    default_transport_backoff,
                )?,
                vote_fetch_interval_ms: parse_or(
                    &var,
                    "TALLY_VOTE_FETCH_INTERVAL_MS",
                    default_vote_fetch_interval,
                )?,
                http_timeout_secs: parse_or(&var, "TALLY_HTTP_TIMEOUT_SECS", default_http_timeout)?,
            },
            ens: EnsConfig {
                api_key: var("ALCHEMY_API_KEY"),
                rpc_url: var("ENS_RPC_URL").unwrap_or_else(default_ens_rpc_url),
                registry_address: var("ENS_REGISTRY_ADDRESS").unwrap_or_else(default_ens_registry),
                lookup_batch_size: parse_or(&var, "ENS_LOOKUP_BATCH_SIZE", default_lookup_batch_size)?,
                lookup_pause_ms: parse_or(&var, "ENS_LOOKUP_PAUSE_MS", default_lookup_pause)?,
            },
            rate_limit: RateLimitConfig {
                requests_per_second: parse_or(
                    &var,
                    "RATE_LIMIT_REQUESTS_PER_SECOND",
                    default_requests_per_second,
                )?,
                burst: parse_or(&var, "RATE_LIMIT_BURST", default_burst)?,
            },
            cors: CorsConfig {
                allowed_origins: var("CORS_ALLOWED_ORIGINS")
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|origin| !origin.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
        })
    }
}

fn parse_or<T, V, D>(var: &V, key: &'static str, default: D) -> Result<T, ConfigError>
where
    T: FromStr,
    V: Fn(&str) -> Option<String>,
    D: FnOnce() -> T,
{
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
        None => Ok(default()),
    }
}

fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
