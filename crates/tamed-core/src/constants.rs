//! Shared constants

/// Number of leading bytes inspected when sniffing a content type.
pub const SNIFF_LEN: usize = 512;

/// Default number of files a batch processes at once.
pub const DEFAULT_UPLOAD_CONCURRENCY: usize = 1;

/// Default Postgres pool size.
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

/// Base data directory used when `FS_LOCAL_PATH` is not set.
pub const DEFAULT_LOCAL_PATH: &str = "./data";
