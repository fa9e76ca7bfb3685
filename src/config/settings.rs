//! Runtime settings read from the environment (after `.env` is loaded by the binary).

use crate::error::ConfigError;
use crate::response::AbsentPolicy;
use regex::Regex;
use std::net::SocketAddr;
use std::sync::OnceLock;
use std::time::Duration;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/crud_service";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Backing store for both repositories.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    /// In-process maps; nothing survives a restart.
    Memory,
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    /// Schema holding the entity tables.
    pub db_schema: String,
    pub db_max_connections: u32,
    pub db_acquire_timeout: Duration,
    pub absent_policy: AbsentPolicy,
    /// Create schema and tables at startup when missing.
    pub auto_create_tables: bool,
    pub max_body_bytes: usize,
    pub store: StoreKind,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            database_url: DEFAULT_DATABASE_URL.into(),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            db_schema: "public".into(),
            db_max_connections: 5,
            db_acquire_timeout: Duration::from_secs(5),
            absent_policy: AbsentPolicy::NotFound,
            auto_create_tables: true,
            max_body_bytes: 1024 * 1024,
            store: StoreKind::Postgres,
        }
    }
}

impl Settings {
    /// Read settings from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut s = Settings::default();
        if let Some(v) = lookup("DATABASE_URL") {
            if v.trim().is_empty() {
                return Err(ConfigError::Missing("DATABASE_URL"));
            }
            s.database_url = v;
        }
        if let Some(v) = lookup("BIND_ADDR") {
            s.bind_addr = parse_value("BIND_ADDR", &v)?;
        }
        if let Some(v) = lookup("DB_SCHEMA") {
            if !is_identifier(&v) {
                return Err(ConfigError::InvalidValue { key: "DB_SCHEMA", value: v });
            }
            s.db_schema = v;
        }
        if let Some(v) = lookup("DB_MAX_CONNECTIONS") {
            s.db_max_connections = parse_value("DB_MAX_CONNECTIONS", &v)?;
            if s.db_max_connections == 0 {
                return Err(ConfigError::InvalidValue { key: "DB_MAX_CONNECTIONS", value: v });
            }
        }
        if let Some(v) = lookup("DB_ACQUIRE_TIMEOUT_SECS") {
            s.db_acquire_timeout = Duration::from_secs(parse_value("DB_ACQUIRE_TIMEOUT_SECS", &v)?);
        }
        if let Some(v) = lookup("ABSENT_AS_NULL") {
            s.absent_policy = if parse_bool("ABSENT_AS_NULL", &v)? {
                AbsentPolicy::Null
            } else {
                AbsentPolicy::NotFound
            };
        }
        if let Some(v) = lookup("AUTO_CREATE_TABLES") {
            s.auto_create_tables = parse_bool("AUTO_CREATE_TABLES", &v)?;
        }
        if let Some(v) = lookup("MAX_BODY_BYTES") {
            s.max_body_bytes = parse_value("MAX_BODY_BYTES", &v)?;
        }
        if let Some(v) = lookup("STORE") {
            s.store = match v.to_lowercase().as_str() {
                "postgres" | "postgresql" => StoreKind::Postgres,
                "memory" => StoreKind::Memory,
                _ => return Err(ConfigError::InvalidValue { key: "STORE", value: v }),
            };
        }
        Ok(s)
    }
}

fn parse_value<T: std::str::FromStr>(key: &'static str, v: &str) -> Result<T, ConfigError> {
    v.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: v.to_string(),
    })
}

fn parse_bool(key: &'static str, v: &str) -> Result<bool, ConfigError> {
    match v.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: v.to_string(),
        }),
    }
}

/// Unquoted PostgreSQL identifier.
fn is_identifier(v: &str) -> bool {
    static IDENT: OnceLock<Regex> = OnceLock::new();
    IDENT
        .get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]{0,62}$").expect("identifier pattern compiles"))
        .is_match(v)
}
