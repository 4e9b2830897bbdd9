//! Main configuration

use super::{DiscoveryConfig, ExecutionConfig, LoggingConfig};
use crate::serialization::JsonSettings;
use serde::{Deserialize, Serialize};

/// Main TCV configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConventionConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Test discovery configuration
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    /// Test execution configuration
    #[serde(default)]
    pub execution: ExecutionConfig,
    /// JSON settings registered in every class container
    #[serde(default)]
    pub json: JsonSettings,
}
