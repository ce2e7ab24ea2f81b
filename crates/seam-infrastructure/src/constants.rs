//! Infrastructure layer constants
//!
//! Resolution defaults are defined in `seam_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "seam.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "seam";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "SEAM";

/// Separator between nested keys in environment variable names
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "SEAM_LOG";

/// File stem used for rolling log files
pub const LOG_FILE_STEM: &str = "seam";
