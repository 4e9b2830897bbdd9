//! Domain layer constants
//!
//! Reserved names shared with test projects. Discovery never treats a method
//! carrying one of the lifecycle names as a test.

/// Name of the per-case hook run before each test body
pub const SETUP_LIFECYCLE_METHOD_NAME: &str = "Setup";

/// Name of the per-case hook run after each test body
pub const CLEANUP_LIFECYCLE_METHOD_NAME: &str = "Cleanup";

/// Name of the per-class service configuration hook
pub const CONFIGURE_SERVICES_METHOD_NAME: &str = "ConfigureServices";

/// Method names that are lifecycle hooks rather than tests
pub const RESERVED_LIFECYCLE_METHOD_NAMES: [&str; 2] =
    [SETUP_LIFECYCLE_METHOD_NAME, CLEANUP_LIFECYCLE_METHOD_NAME];

/// Returns true when `name` is one of the reserved lifecycle hook names
pub fn is_lifecycle_method_name(name: &str) -> bool {
    RESERVED_LIFECYCLE_METHOD_NAMES.contains(&name)
}
