use std::env;
use std::str::FromStr;

// ============================================================================
// Configuration
// ============================================================================
//
// Everything is resolved from the environment once at startup; nothing
// downstream reads the environment again.
//
// ============================================================================

/// Which persistence backend is active for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Sql,
    Orm,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "sql" => Ok(Self::Sql),
            "orm" => Ok(Self::Orm),
            other => anyhow::bail!("unknown store backend: {other}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub backend: StoreBackend,
    pub database_url: String,
    pub bind_addr: String,
    pub port: u16,
}

impl Config {
    /// Read the configuration from the environment. An unrecognized
    /// CUSTOMER_STORE value is a startup error, not a silent fallback.
    pub fn from_env() -> anyhow::Result<Self> {
        let backend = match env::var("CUSTOMER_STORE") {
            Ok(value) => value.parse()?,
            Err(_) => StoreBackend::Memory,
        };

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://customers.db?mode=rwc".to_string());

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = match env::var("PORT") {
            Ok(value) => value.parse()?,
            Err(_) => 8080,
        };

        Ok(Self {
            backend,
            database_url,
            bind_addr,
            port,
        })
    }
}
