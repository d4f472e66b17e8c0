use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Post store backend types
///
/// Selects where post metadata and view records are persisted. Defined in core
/// because configuration parses it and the db factory consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStoreBackend {
    /// One JSON document per record under `FS_POSTDB_PATH`
    Fs,
    /// Postgres tables reached through `PG_URL`
    Postgres,
}

impl FromStr for PostStoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fs" | "filesystem" => Ok(PostStoreBackend::Fs),
            "postgres" | "pg" => Ok(PostStoreBackend::Postgres),
            _ => Err(anyhow::anyhow!("Invalid post store backend: {}", s)),
        }
    }
}

impl Display for PostStoreBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            PostStoreBackend::Fs => write!(f, "fs"),
            PostStoreBackend::Postgres => write!(f, "postgres"),
        }
    }
}
