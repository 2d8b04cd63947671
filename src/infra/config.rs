//! Centralized configuration (environment variables + defaults).

use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_PG_PORT: u16 = 5432;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 50 * 1024 * 1024;
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

/// Cross-origin policy applied by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsPolicy {
    /// Only the listed origins, credentials allowed.
    AllowList(Vec<String>),
    /// Any origin, no credentials.
    Permissive,
}

impl CorsPolicy {
    fn parse(raw: &str) -> Self {
        if raw.trim() == "*" {
            return CorsPolicy::Permissive;
        }
        let origins = raw
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();
        CorsPolicy::AllowList(origins)
    }
}

/// Connection settings for the traffic store.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Full URL; when present it wins over the individual parts.
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub dbname: String,
    pub user: String,
    pub password: Option<String>,
    pub require_tls: bool,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn connect_options(&self) -> Result<PgConnectOptions> {
        let opts = match &self.url {
            Some(url) => url
                .parse::<PgConnectOptions>()
                .context("DATABASE_URL is not a valid postgres URL")?,
            None => {
                let mut opts = PgConnectOptions::new()
                    .host(&self.host)
                    .port(self.port)
                    .database(&self.dbname)
                    .username(&self.user);
                if let Some(password) = &self.password {
                    opts = opts.password(password);
                }
                opts
            }
        };
        // `Require` encrypts without verifying the server certificate.
        let ssl = if self.require_tls {
            PgSslMode::Require
        } else {
            PgSslMode::Disable
        };
        Ok(opts.ssl_mode(ssl))
    }

    /// Human readable target with the password left out.
    pub fn redacted(&self) -> String {
        match &self.url {
            Some(_) => "DATABASE_URL (redacted)".to_string(),
            None => format!(
                "postgres://{}@{}:{}/{} (tls: {})",
                self.user, self.host, self.port, self.dbname, self.require_tls
            ),
        }
    }
}

/// Resolved service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub bind_addr: SocketAddr,
    pub geojson_dir: PathBuf,
    pub cors: CorsPolicy,
    pub body_limit_bytes: usize,
}

impl Config {
    /// Loads `.env` (if any) and reads the process environment.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database = DatabaseConfig {
            url: var("DATABASE_URL"),
            host: var("PGHOST").unwrap_or_else(|| "localhost".into()),
            port: parse_or(var("PGPORT"), "PGPORT", DEFAULT_PG_PORT)?,
            dbname: var("PGDATABASE").unwrap_or_else(|| "postgres".into()),
            user: var("PGUSER").unwrap_or_else(|| "postgres".into()),
            password: var("PGPASSWORD"),
            require_tls: var("PGSSLMODE").is_some_and(|m| m.trim().eq_ignore_ascii_case("require")),
            max_connections: parse_or(
                var("PG_MAX_CONNECTIONS"),
                "PG_MAX_CONNECTIONS",
                DEFAULT_MAX_CONNECTIONS,
            )?
            .max(1),
        };

        let port: u16 = parse_or(var("PORT"), "PORT", DEFAULT_PORT)?;
        let host = var("BIND_ADDR").unwrap_or_else(|| "0.0.0.0".into());
        let bind_addr: SocketAddr = format!("{}:{}", host, port)
            .parse()
            .with_context(|| format!("BIND_ADDR/PORT do not form a socket address: {}:{}", host, port))?;

        let geojson_dir = match var("GEOJSON_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => std::env::current_dir()
                .context("Failed to resolve the working directory")?
                .join("public")
                .join("nuevos_geojson"),
        };

        let cors = CorsPolicy::parse(&var("CORS_ORIGINS").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.into()));
        let body_limit_bytes = parse_or(var("BODY_LIMIT_BYTES"), "BODY_LIMIT_BYTES", DEFAULT_BODY_LIMIT_BYTES)?;

        Ok(Self {
            database,
            bind_addr,
            geojson_dir,
            cors,
            body_limit_bytes,
        })
    }
}

fn parse_or<T>(raw: Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(v) => v
            .trim()
            .parse::<T>()
            .with_context(|| format!("{} has an invalid value: {}", key, v)),
        None => Ok(default),
    }
}
