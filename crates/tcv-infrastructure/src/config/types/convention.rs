//! Discovery and execution policy types

use serde::{Deserialize, Serialize};

/// Test discovery configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Tags always requested, merged with tags from the command line
    pub tags: Vec<String>,

    /// Keep classes whose methods were all filtered out, with zero cases
    pub retain_empty_classes: bool,
}

/// Test execution configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Run the Cleanup hook even when Setup failed for the same case
    pub cleanup_after_failed_setup: bool,
}
