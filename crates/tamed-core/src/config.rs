//! Configuration module
//!
//! Configuration is read once at startup into an explicit [`Config`] value that is
//! passed to the store factories and service constructors. Invalid settings are
//! reported by [`Config::validate`] before anything touches storage.

use std::env;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::constants::{DEFAULT_DB_MAX_CONNECTIONS, DEFAULT_LOCAL_PATH, DEFAULT_UPLOAD_CONCURRENCY};
use crate::storage_types::PostStoreBackend;

/// Application configuration
#[derive(Clone, Debug, Serialize)]
pub struct Config {
    /// Base data directory
    pub fs_local_path: PathBuf,
    /// Root directory of stored media files
    pub fs_media_path: PathBuf,
    /// Root directory of the filesystem post database
    pub fs_postdb_path: PathBuf,
    /// Prefix of the links handed out for stored media
    pub media_base_url: String,
    pub post_store_backend: PostStoreBackend,
    #[serde(serialize_with = "serialize_redacted_url")]
    pub pg_url: Option<String>,
    /// Drop and recreate the Postgres tables at startup
    pub pg_reset: bool,
    pub db_max_connections: u32,
    /// Files of one batch processed at once; 1 means strictly sequential
    pub upload_concurrency: usize,
    pub environment: String,
}

impl Config {
    /// Load configuration from the process environment (and `.env`, if present)
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        let config = Self::from_lookup(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Does not validate; callers run [`Config::validate`] once all overrides are applied.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let fs_local_path =
            PathBuf::from(var("FS_LOCAL_PATH").unwrap_or_else(|| DEFAULT_LOCAL_PATH.to_string()));
        let fs_media_path = var("FS_MEDIA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| fs_local_path.join("media"));
        let fs_postdb_path = var("FS_POSTDB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| fs_local_path.join("postdb"));
        let media_base_url = var("MEDIA_BASE_URL")
            .unwrap_or_else(|| format!("file://{}", fs_media_path.display()));

        let pg_url = var("PG_URL");
        let post_store_backend = match var("POST_STORE_BACKEND") {
            Some(value) => value.parse::<PostStoreBackend>()?,
            None if pg_url.is_some() => PostStoreBackend::Postgres,
            None => PostStoreBackend::Fs,
        };

        let pg_reset = var("PG_RESET")
            .map(|v| parse_bool(&v))
            .transpose()
            .map_err(|_| anyhow::anyhow!("PG_RESET must be true or false"))?
            .unwrap_or(false);

        let db_max_connections = var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|| DEFAULT_DB_MAX_CONNECTIONS.to_string())
            .parse()
            .map_err(|_| anyhow::anyhow!("DB_MAX_CONNECTIONS must be a valid number"))?;

        let upload_concurrency = var("UPLOAD_CONCURRENCY")
            .unwrap_or_else(|| DEFAULT_UPLOAD_CONCURRENCY.to_string())
            .parse()
            .map_err(|_| anyhow::anyhow!("UPLOAD_CONCURRENCY must be a valid number"))?;

        let environment = var("ENVIRONMENT")
            .or_else(|| var("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        Ok(Config {
            fs_local_path,
            fs_media_path,
            fs_postdb_path,
            media_base_url,
            post_store_backend,
            pg_url,
            pg_reset,
            db_max_connections,
            upload_concurrency,
            environment,
        })
    }

    /// Configuration rooted at a single directory, filesystem stores only
    pub fn local(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let fs_media_path = root.join("media");
        Config {
            fs_local_path: root.to_path_buf(),
            media_base_url: format!("file://{}", fs_media_path.display()),
            fs_media_path,
            fs_postdb_path: root.join("postdb"),
            post_store_backend: PostStoreBackend::Fs,
            pg_url: None,
            pg_reset: false,
            db_max_connections: DEFAULT_DB_MAX_CONNECTIONS,
            upload_concurrency: DEFAULT_UPLOAD_CONCURRENCY,
            environment: "development".to_string(),
        }
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.fs_media_path.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("FS_MEDIA_PATH must not be empty"));
        }

        if self.media_base_url.trim().is_empty() {
            return Err(anyhow::anyhow!("MEDIA_BASE_URL must not be empty"));
        }

        if self.upload_concurrency == 0 {
            return Err(anyhow::anyhow!("UPLOAD_CONCURRENCY must be at least 1"));
        }

        match self.post_store_backend {
            PostStoreBackend::Fs => {
                if self.fs_postdb_path.as_os_str().is_empty() {
                    return Err(anyhow::anyhow!(
                        "FS_POSTDB_PATH must be set when using the fs post store"
                    ));
                }
            }
            PostStoreBackend::Postgres => {
                let url = self.pg_url.as_deref().ok_or_else(|| {
                    anyhow::anyhow!("PG_URL must be set when using the postgres post store")
                })?;
                if !url.starts_with("postgres://") && !url.starts_with("postgresql://") {
                    return Err(anyhow::anyhow!(
                        "PG_URL must be a valid PostgreSQL connection string"
                    ));
                }
                if self.db_max_connections == 0 {
                    return Err(anyhow::anyhow!("DB_MAX_CONNECTIONS must be at least 1"));
                }
            }
        }

        if self.pg_reset && self.is_production() {
            return Err(anyhow::anyhow!("PG_RESET cannot be enabled in production"));
        }

        Ok(())
    }
}

fn parse_bool(value: &str) -> Result<bool, ()> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(()),
    }
}

/// Hide the password component of a connection URL
pub fn redact_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    let Some((credentials, host)) = rest.rsplit_once('@') else {
        return url.to_string();
    };
    match credentials.split_once(':') {
        Some((user, _)) => format!("{}://{}:***@{}", scheme, user, host),
        None => url.to_string(),
    }
}

fn serialize_redacted_url<S>(url: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match url {
        Some(url) => serializer.serialize_some(&redact_url(url)),
        None => serializer.serialize_none(),
    }
}
