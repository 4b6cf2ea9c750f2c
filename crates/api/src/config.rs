/// Which storage the content service talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendConfig {
    /// Process-local rows; lost on restart.
    Memory,
    /// Supabase project REST API.
    Supabase { url: String, api_key: String },
    /// Direct PostgreSQL connection.
    Postgres { database_url: String },
}

impl BackendConfig {
    /// Short name used in logs and the health payload.
    pub fn kind(&self) -> &'static str {
        match self {
            BackendConfig::Memory => "memory",
            BackendConfig::Supabase { .. } => "supabase",
            BackendConfig::Postgres { .. } => "postgres",
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Content storage selection.
    pub backend: BackendConfig,
    /// Upsert the default content list at startup (default: `false`).
    pub seed_default_content: bool,
    /// Emit JSON log lines instead of the human-readable format.
    pub json_logs: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `CONTENT_BACKEND`      | `memory`                   |
    /// | `SUPABASE_URL`         | required for `supabase`    |
    /// | `SUPABASE_KEY`         | required for `supabase`    |
    /// | `DATABASE_URL`         | required for `postgres`    |
    /// | `SEED_DEFAULT_CONTENT` | `false`                    |
    /// | `LOG_FORMAT`           | `text` (`json` to switch)  |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Panics on malformed or missing required values so misconfiguration
    /// fails at startup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = var("HOST", "0.0.0.0");

        let port: u16 = var("PORT", "3000")
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = var("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = var("REQUEST_TIMEOUT_SECS", "30")
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let backend = match var("CONTENT_BACKEND", "memory").to_lowercase().as_str() {
            "memory" => BackendConfig::Memory,
            "supabase" => BackendConfig::Supabase {
                url: lookup("SUPABASE_URL").expect("SUPABASE_URL must be set for supabase"),
                api_key: lookup("SUPABASE_KEY").expect("SUPABASE_KEY must be set for supabase"),
            },
            "postgres" => BackendConfig::Postgres {
                database_url: lookup("DATABASE_URL")
                    .expect("DATABASE_URL must be set for postgres"),
            },
            other => panic!(
                "CONTENT_BACKEND must be one of memory, supabase, postgres; got '{other}'"
            ),
        };

        let seed_default_content = parse_bool(&var("SEED_DEFAULT_CONTENT", "false"))
            .expect("SEED_DEFAULT_CONTENT must be a boolean");

        let json_logs = var("LOG_FORMAT", "text").eq_ignore_ascii_case("json");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            backend,
            seed_default_content,
            json_logs,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
