//! Error handling types

use std::fmt;

use thiserror::Error;

use crate::value_objects::{ContractFamily, ContractKey, ImplementationType};

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Failure raised by a user-supplied build recipe
///
/// Recipes may return any error type through `?`; it is boxed here and wrapped
/// into [`Error::ConstructionFailed`] together with the recipe identity.
pub type BuildError = Box<dyn std::error::Error + Send + Sync>;

/// Identity of the recipe that failed during a resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstructionOrigin {
    /// Base implementation recipe of a registration
    Registration {
        /// Order index of the registration
        order: u64,
        /// Contract the registration was bound to
        key: ContractKey,
        /// Implementation type declared at registration time
        implementation: ImplementationType,
    },
    /// Decorator recipe applied on top of a registration
    Decorator {
        /// Decorator name (or the anonymous placeholder)
        name: String,
        /// Contract family the decorator targets
        target: ContractFamily,
        /// Order index of the registration being decorated
        registration_order: u64,
    },
}

impl fmt::Display for ConstructionOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Registration {
                order,
                key,
                implementation,
            } => write!(f, "registration #{order} ({implementation} as {key})"),
            Self::Decorator {
                name,
                target,
                registration_order,
            } => write!(
                f,
                "decorator '{name}' for {target}<_> over registration #{registration_order}"
            ),
        }
    }
}

/// Main error type for the seam engine
#[derive(Error, Debug)]
pub enum Error {
    /// A single-instance resolution found no registration
    #[error("Not registered: {key}")]
    NotRegistered {
        /// The requested contract
        key: ContractKey,
    },

    /// A unique resolution found more than one registration
    #[error("Ambiguous registration: {count} registrations for {key}, expected exactly one")]
    AmbiguousRegistration {
        /// The requested contract
        key: ContractKey,
        /// Number of matching registrations
        count: usize,
    },

    /// A base or decorator build recipe failed
    #[error("Construction failed in {origin}: {source}")]
    ConstructionFailed {
        /// Which recipe failed
        origin: ConstructionOrigin,
        /// The recipe's own error
        #[source]
        source: BuildError,
    },

    /// The registry was mutated after it had been frozen
    #[error("Registry is frozen: {operation} is not allowed after freeze()")]
    FrozenRegistryMutation {
        /// The rejected operation
        operation: &'static str,
    },

    /// The duplicate policy rejected a registration
    #[error("Duplicate registration not allowed: {implementation} as {key}")]
    DuplicateNotAllowed {
        /// Contract of the rejected registration
        key: ContractKey,
        /// Implementation type of the rejected registration
        implementation: ImplementationType,
    },

    /// An instance did not hold the type the caller asked for
    #[error("Instance type mismatch: expected {expected}, found {actual}")]
    InstanceTypeMismatch {
        /// Requested Rust type
        expected: &'static str,
        /// Stored Rust type
        actual: &'static str,
    },

    /// Nested resolutions from build recipes went too deep
    #[error("Resolution depth exceeded while resolving {key} (max depth {max_depth})")]
    ResolutionDepthExceeded {
        /// Contract being resolved when the bound was hit
        key: ContractKey,
        /// Configured bound
        max_depth: usize,
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

    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Infrastructure operation error
    #[error("Infrastructure error: {message}")]
    Infrastructure {
        /// Description of the infrastructure error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Broken internal invariant
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the broken invariant
        message: String,
    },
}

// Resolution error creation methods
impl Error {
    /// Create a not registered error
    pub fn not_registered(key: ContractKey) -> Self {
        Self::NotRegistered { key }
    }

    /// Create an ambiguous registration error
    pub fn ambiguous(key: ContractKey, count: usize) -> Self {
        Self::AmbiguousRegistration { key, count }
    }

    /// Wrap a recipe failure with the identity of the recipe
    pub fn construction_failed(origin: ConstructionOrigin, source: BuildError) -> Self {
        Self::ConstructionFailed { origin, source }
    }

    /// Create a frozen registry mutation error
    pub fn frozen(operation: &'static str) -> Self {
        Self::FrozenRegistryMutation { operation }
    }

    /// Create a duplicate registration error
    pub fn duplicate(key: ContractKey, implementation: ImplementationType) -> Self {
        Self::DuplicateNotAllowed {
            key,
            implementation,
        }
    }

    /// Create a depth exceeded error
    pub fn depth_exceeded(key: ContractKey, max_depth: usize) -> Self {
        Self::ResolutionDepthExceeded { key, max_depth }
    }
}

// Infrastructure error creation methods
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

    /// Create an I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// Create an infrastructure error
    pub fn infrastructure<S: Into<String>>(message: S) -> Self {
        Self::Infrastructure {
            message: message.into(),
            source: None,
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl Error {
    /// Origin of a construction failure, if this is one
    pub fn construction_origin(&self) -> Option<&ConstructionOrigin> {
        match self {
            Self::ConstructionFailed { origin, .. } => Some(origin),
            _ => None,
        }
    }
}
