//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, AuthConfig, ConfigError, CorsConfig, EnsConfig, Environment,
    RateLimitConfig, RedisConfig, ServerConfig, TallyConfig,
};
