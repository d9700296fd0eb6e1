/// Configuration management for the API server
///
/// This module loads configuration from environment variables and provides
/// a type-safe configuration struct. A `.env` file in the working directory
/// is read first if present.
///
/// # Environment Variables
///
/// - `HOST`: Host to bind to (default: 0.0.0.0)
/// - `PORT`: Port to bind to (default: 3000)
/// - `DATABASE_PATH`: SQLite database file (default: database/tasks.db)
/// - `DATABASE_MAX_CONNECTIONS`: Connections held by the store handle (default: 1)
/// - `CORS_ORIGINS`: Comma-separated allowed origins, `*` for any (default: *)
/// - `LOG_FORMAT`: `pretty` or `json` (default: pretty)
/// - `RUST_LOG`: Log filter
///
/// # Example
///
/// ```no_run
/// use taskboard_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};
use std::env;
use taskboard_shared::db::pool::DatabaseConfig as StoreConfig;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Logging configuration
    pub log: LogConfig,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Allowed CORS origins (`*` allows any)
    pub cors_origins: Vec<String>,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite database file, or `:memory:`
    pub path: String,

    /// Maximum number of connections held by the store handle
    pub max_connections: u32,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        let store = StoreConfig::default();
        Self {
            api: ApiConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
                cors_origins: vec!["*".to_string()],
            },
            database: DatabaseConfig {
                path: store.path,
                max_connections: store.max_connections,
            },
            log: LogConfig {
                format: LogFormat::Pretty,
            },
        }
    }
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// Unset variables fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable, `CORS_ORIGINS` or
    /// `LOG_FORMAT` has an invalid value
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let host = env::var("HOST").unwrap_or(defaults.api.host);
        let port = match env::var("PORT") {
            Ok(value) => value
                .parse::<u16>()
                .map_err(|e| anyhow::anyhow!("PORT must be a valid port number: {}", e))?,
            Err(_) => defaults.api.port,
        };

        let cors_origins = match env::var("CORS_ORIGINS") {
            Ok(value) => parse_origins(&value)?,
            Err(_) => defaults.api.cors_origins,
        };

        let path = env::var("DATABASE_PATH").unwrap_or(defaults.database.path);
        let max_connections = match env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(value) => value.parse::<u32>().map_err(|e| {
                anyhow::anyhow!("DATABASE_MAX_CONNECTIONS must be a positive integer: {}", e)
            })?,
            Err(_) => defaults.database.max_connections,
        };
        if max_connections == 0 {
            anyhow::bail!("DATABASE_MAX_CONNECTIONS must be at least 1");
        }

        let format = match env::var("LOG_FORMAT") {
            Ok(value) => parse_log_format(&value)?,
            Err(_) => defaults.log.format,
        };

        Ok(Self {
            api: ApiConfig {
                host,
                port,
                cors_origins,
            },
            database: DatabaseConfig {
                path,
                max_connections,
            },
            log: LogConfig { format },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }

    /// Whether any origin may call the API
    pub fn allows_any_origin(&self) -> bool {
        self.api.cors_origins.iter().any(|origin| origin == "*")
    }

    /// Store settings for `taskboard_shared::db::pool::create_pool`
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            path: self.database.path.clone(),
            max_connections: self.database.max_connections,
            ..Default::default()
        }
    }
}

fn parse_origins(value: &str) -> anyhow::Result<Vec<String>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            if origin != "*" {
                validate_origin(origin)?;
            }
            Ok::<_, anyhow::Error>(origin.to_string())
        })
        .collect()
}

fn validate_origin(origin: &str) -> anyhow::Result<()> {
    let has_scheme = origin.starts_with("http://") || origin.starts_with("https://");
    if !has_scheme || HeaderValue::from_str(origin).is_err() {
        anyhow::bail!(
            "CORS_ORIGINS entries must be '*' or an http(s) origin, got '{}'",
            origin
        );
    }
    Ok(())
}

fn parse_log_format(value: &str) -> anyhow::Result<LogFormat> {
    match value.trim().to_ascii_lowercase().as_str() {
        "pretty" | "text" => Ok(LogFormat::Pretty),
        "json" => Ok(LogFormat::Json),
        other => anyhow::bail!("LOG_FORMAT must be 'pretty' or 'json', got '{}'", other),
    }
}
