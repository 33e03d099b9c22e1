use anyhow::{Context, Result};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Runs on the in-memory store when unset
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub api_keys: String,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: match var("PORT") {
                Some(port) => port.trim().parse().context("PORT must be a number")?,
                None => DEFAULT_PORT,
            },
            database_url: var("DATABASE_URL"),
            database_max_connections: match var("DATABASE_MAX_CONNECTIONS") {
                Some(max) => max
                    .trim()
                    .parse()
                    .context("DATABASE_MAX_CONNECTIONS must be a number")?,
                None => DEFAULT_MAX_CONNECTIONS,
            },
            api_keys: var("API_KEYS").unwrap_or_default(),
            max_upload_bytes: match var("MAX_UPLOAD_BYTES") {
                Some(bytes) => bytes
                    .trim()
                    .parse()
                    .context("MAX_UPLOAD_BYTES must be a number of bytes")?,
                None => DEFAULT_MAX_UPLOAD_BYTES,
            },
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
