// =============================================================================
// Application Identity
// =============================================================================

/// Application name in title case (for display)
pub const APP_NAME: &str = "TD Jobs";

/// Application name in lowercase (for paths and identifiers)
pub const APP_NAME_LOWER: &str = "tdjobs";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".tdjobs";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "tdjobs.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "TDJOBS_CONFIG";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "TDJOBS_LOG";

// =============================================================================
// Environment Variables - Database
// =============================================================================

/// Environment variable for the database backend (sqlite or postgres)
pub const ENV_DB_BACKEND: &str = "TDJOBS_DB_BACKEND";

/// Environment variable for the database connection URL
pub const ENV_DATABASE_URL: &str = "TDJOBS_DATABASE_URL";

// =============================================================================
// Environment Variables - Filters
// =============================================================================

/// Environment variable for the maximum accepted filter size in bytes
pub const ENV_MAX_FILTER_BYTES: &str = "TDJOBS_MAX_FILTER_BYTES";

// =============================================================================
// SQLite Defaults
// =============================================================================

/// Default SQLite database URL (file in the working directory)
pub const DEFAULT_SQLITE_URL: &str = "sqlite://tdjobs.db";

/// SQLite busy timeout in seconds
pub const SQLITE_BUSY_TIMEOUT_SECS: u64 = 5;

/// SQLite pool size
pub const SQLITE_MAX_CONNECTIONS: u32 = 4;

// =============================================================================
// PostgreSQL Defaults
// =============================================================================

/// Maximum pool connections
pub const POSTGRES_DEFAULT_MAX_CONNECTIONS: u32 = 20;

/// Connections kept warm
pub const POSTGRES_DEFAULT_MIN_CONNECTIONS: u32 = 2;

/// Connection acquire timeout in seconds
pub const POSTGRES_DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;

/// Statement timeout in seconds (0 = disabled)
pub const POSTGRES_DEFAULT_STATEMENT_TIMEOUT_SECS: u64 = 60;
