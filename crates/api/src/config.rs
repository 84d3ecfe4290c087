use std::path::PathBuf;
use std::str::FromStr;

use ecoleta_core::media::normalize_base_url;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3333`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Directory uploaded images are written to and served from.
    pub uploads_dir: PathBuf,
    /// Public base URL of the uploads directory, always ending in `/`.
    pub public_uploads_url: String,
    /// Maximum accepted size of a registration request body.
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                          |
    /// |------------------------|----------------------------------|
    /// | `HOST`                 | `0.0.0.0`                        |
    /// | `PORT`                 | `3333`                           |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`          |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                             |
    /// | `UPLOADS_DIR`          | `uploads`                        |
    /// | `PUBLIC_UPLOADS_URL`   | `http://localhost:3333/uploads/` |
    /// | `MAX_UPLOAD_BYTES`     | `10485760`                       |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Panics if a numeric value does not parse: misconfiguration should
    /// fail at startup, not on the first request.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = parse_or(&lookup, "PORT", 3333);

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30);

        let uploads_dir =
            PathBuf::from(lookup("UPLOADS_DIR").unwrap_or_else(|| "uploads".into()));

        let public_uploads_url = normalize_base_url(
            &lookup("PUBLIC_UPLOADS_URL")
                .unwrap_or_else(|| "http://localhost:3333/uploads/".into()),
        );

        let max_upload_bytes: usize = parse_or(&lookup, "MAX_UPLOAD_BYTES", 10 * 1024 * 1024);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            uploads_dir,
            public_uploads_url,
            max_upload_bytes,
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key} must be a valid number, got '{raw}': {e}")),
        None => default,
    }
}
