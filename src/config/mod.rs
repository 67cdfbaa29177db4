use std::env;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::rules::ScanStrategy;

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub rules: RulesConfig,
}

// Настройки приложения
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub rust_log: String,
}

impl AppConfig {
    /// В проде логи пишутся JSON-строками.
    pub fn json_logs(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}

// Настройки базы данных
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub pool_size: u32,
}

// Настройки Redis
#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub url: String,
}

// Настройки проверки правил рассадки
#[derive(Debug, Clone)]
pub struct RulesConfig {
    pub scan_strategy: ScanStrategy,
    /// TTL кеша агрегатов по всем местам схемы, секунды
    pub aggregate_cache_ttl_secs: u64,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            scan_strategy: ScanStrategy::EveryIndex,
            aggregate_cache_ttl_secs: 300,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Config {
            app: AppConfig {
                host: var_or("HOST", "0.0.0.0"),
                port: parse_or("PORT", 8000, "port number")?,
                environment: var_or("ENVIRONMENT", "development"),
                rust_log: var_or("RUST_LOG", "seat_rules=debug,tower_http=debug"),
            },
            database: DatabaseConfig {
                url: required("DATABASE_URL")?,
                pool_size: parse_or("DB_POOL_SIZE", 20, "number")?,
            },
            redis: RedisConfig {
                url: required("REDIS_URL")?,
            },
            rules: RulesConfig {
                scan_strategy: match env::var("RULES_SCAN_STRATEGY") {
                    Ok(value) => value.parse()?,
                    Err(_) => ScanStrategy::default(),
                },
                aggregate_cache_ttl_secs: parse_or(
                    "RULES_AGGREGATE_CACHE_TTL_SECS",
                    RulesConfig::default().aggregate_cache_ttl_secs,
                    "number of seconds",
                )?,
            },
        })
    }
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::Missing(name))
}

fn parse_or<T: FromStr>(name: &'static str, default: T, expected: &'static str) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value.parse().map_err(|_| ConfigError::Invalid { name, expected, value }),
        Err(_) => Ok(default),
    }
}
