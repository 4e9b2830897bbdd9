//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for TCV
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error
        #[from]
        source: std::io::Error,
    },

    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// No registration exists for the requested service type
    #[error("Service not registered: {service}")]
    ServiceNotRegistered {
        /// Type name of the requested service
        service: String,
    },

    /// A registration exists but its factory could not produce an instance
    #[error("Failed to resolve {service}: {message}")]
    Resolution {
        /// Type name of the requested service
        service: String,
        /// Why the factory failed
        message: String,
    },

    /// The scope or provider was used after being disposed
    #[error("Scope already disposed: {scope}")]
    ScopeDisposed {
        /// Description of the disposed scope
        scope: String,
    },

    /// The test plan broke the discovery contract
    #[error("Invalid test plan: {message}")]
    InvalidPlan {
        /// Description of the broken entry
        message: String,
    },

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

// Resolution error creation methods
impl Error {
    /// Create a service-not-registered error
    pub fn service_not_registered<S: Into<String>>(service: S) -> Self {
        Self::ServiceNotRegistered {
            service: service.into(),
        }
    }

    /// Create a resolution error
    pub fn resolution<S: Into<String>, M: Into<String>>(service: S, message: M) -> Self {
        Self::Resolution {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Create a scope-disposed error
    pub fn scope_disposed<S: Into<String>>(scope: S) -> Self {
        Self::ScopeDisposed {
            scope: scope.into(),
        }
    }
}

// Plan and argument error creation methods
impl Error {
    /// Create an invalid plan error
    pub fn invalid_plan<S: Into<String>>(message: S) -> Self {
        Self::InvalidPlan {
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

// Configuration error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

impl Error {
    /// True for errors that mean the plan or engine contract was broken and
    /// the whole run must stop
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::InvalidPlan { .. } | Self::Internal { .. })
    }
}
