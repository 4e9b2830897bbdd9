//! Infrastructure layer constants
//!
//! Reserved method names live in `tcv_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "tcv.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "tcv";

/// Environment variable prefix for configuration (`TCV__SECTION__KEY`)
pub const CONFIG_ENV_PREFIX: &str = "TCV";

/// Separator between the prefix and nested configuration keys
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the configured log filter
pub const LOG_FILTER_ENV_VAR: &str = "TCV_LOG";

/// File stem used for rolling log files
pub const LOG_FILE_STEM: &str = "tcv";

// ============================================================================
// SERVICE CONTAINER CONSTANTS
// ============================================================================

/// Maximum nesting of service resolutions before a cycle is assumed
pub const MAX_RESOLUTION_DEPTH: usize = 64;
