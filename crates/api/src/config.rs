use std::path::PathBuf;
use std::time::Duration;

use porto_core::image_intake::DEFAULT_COMPRESSION_TIMEOUT_SECS;
use porto_core::profile::{ProfilePhoto, DEFAULT_PHOTO_PATH};
use porto_core::store::DEFAULT_STORE_TIMEOUT_SECS;

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
    /// Limit on a single store call in seconds (default: `15`).
    pub store_timeout_secs: u64,
    /// Limit on one image compression run in seconds (default: `30`).
    pub compression_timeout_secs: u64,
    /// Directory of the built site served for non-API paths.
    pub static_dir: Option<PathBuf>,
    /// Owner name shown on the profile card.
    pub profile_name: String,
    /// Public path of the profile photograph.
    pub profile_photo_path: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                 |
    /// |----------------------------|-------------------------|
    /// | `HOST`                     | `0.0.0.0`               |
    /// | `PORT`                     | `3000`                  |
    /// | `CORS_ORIGINS`             | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                    |
    /// | `STORE_TIMEOUT_SECS`       | `15`                    |
    /// | `COMPRESSION_TIMEOUT_SECS` | `30`                    |
    /// | `STATIC_DIR`               | unset (no static files) |
    /// | `PROFILE_NAME`             | `Portfolio`             |
    /// | `PROFILE_PHOTO_PATH`       | `/profile.jpg`          |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = secs_from_env("REQUEST_TIMEOUT_SECS", 30);
        let store_timeout_secs = secs_from_env("STORE_TIMEOUT_SECS", DEFAULT_STORE_TIMEOUT_SECS);
        let compression_timeout_secs =
            secs_from_env("COMPRESSION_TIMEOUT_SECS", DEFAULT_COMPRESSION_TIMEOUT_SECS);

        let static_dir = std::env::var("STATIC_DIR")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let profile_name = std::env::var("PROFILE_NAME").unwrap_or_else(|_| "Portfolio".into());
        let profile_photo_path =
            std::env::var("PROFILE_PHOTO_PATH").unwrap_or_else(|_| DEFAULT_PHOTO_PATH.into());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            store_timeout_secs,
            compression_timeout_secs,
            static_dir,
            profile_name,
            profile_photo_path,
        }
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_secs(self.store_timeout_secs)
    }

    pub fn compression_timeout(&self) -> Duration {
        Duration::from_secs(self.compression_timeout_secs)
    }

    pub fn profile(&self) -> ProfilePhoto {
        ProfilePhoto::new(&self.profile_name, &self.profile_photo_path)
    }
}

fn secs_from_env(key: &str, default: u64) -> u64 {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|_| panic!("{key} must be a valid u64")),
        Err(_) => default,
    }
}
