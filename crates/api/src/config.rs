use std::str::FromStr;

/// Which [`notebook_db::store::NoteStore`] implementation backs the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Sqlite,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown store backend '{other}'")),
        }
    }
}

/// Output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins from comma-separated `CORS_ORIGINS`; `*` allows any.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub store_backend: StoreBackend,
    /// SQLite location, ignored by the memory backend.
    pub database_url: String,
    /// Seed sample notebooks into an empty store on startup.
    pub seed_data: bool,
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                |
    /// |------------------------|------------------------|
    /// | `HOST`                 | `0.0.0.0`              |
    /// | `PORT`                 | `8000`                 |
    /// | `CORS_ORIGINS`         | `*`                    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                   |
    /// | `STORE_BACKEND`        | `sqlite`               |
    /// | `DATABASE_URL`         | `sqlite://notebook.db` |
    /// | `SEED_DATA`            | `true`                 |
    /// | `LOG_FORMAT`           | `pretty`               |
    ///
    /// Panics on unparseable values so misconfiguration fails at startup.
    pub fn from_env() -> Self {
        let host = env_or("HOST", "0.0.0.0");

        let port: u16 = env_or("PORT", "8000")
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(&env_or("CORS_ORIGINS", "*"));

        let request_timeout_secs: u64 = env_or("REQUEST_TIMEOUT_SECS", "30")
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let store_backend: StoreBackend = env_or("STORE_BACKEND", "sqlite")
            .parse()
            .unwrap_or_else(|e| panic!("STORE_BACKEND: {e}"));

        let database_url = env_or("DATABASE_URL", "sqlite://notebook.db");

        let seed_data: bool = env_or("SEED_DATA", "true")
            .parse()
            .expect("SEED_DATA must be true or false");

        let log_format: LogFormat = env_or("LOG_FORMAT", "pretty")
            .parse()
            .unwrap_or_else(|e| panic!("LOG_FORMAT: {e}"));

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            store_backend,
            database_url,
            seed_data,
            log_format,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.into())
}

/// Split a comma-separated origin list, dropping empty entries.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
