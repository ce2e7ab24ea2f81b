//! # Seam
//!
//! Dependency resolution with ordered multi-registrations and generic
//! decorators selected by capability predicates.
//!
//! Every registration of a contract key resolves to its own instance, wrapped
//! by every decorator whose predicate accepts that registration. Two
//! registrations of the same key never collapse into one, whatever their
//! implementation types.
//!
//! ## Example
//!
//! ```ignore
//! use seam::{CapabilitySet, ContractFamily, ContractKey, Instance, Registry};
//!
//! let mut registry = Registry::new();
//! registry.register_type::<Console, _>(key, CapabilitySet::new(), |_| {
//!     Ok(Instance::new(console()))
//! })?;
//! registry.register_named_decorator("timing", family, |_| true, |_, inner| {
//!     Ok(Instance::new(timed(inner.downcast::<SharedSink>()?)))
//! })?;
//!
//! let container = registry.freeze()?;
//! let sinks = container.resolve_sequence_as::<SharedSink>(&key)?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - Contract identity, instances and errors
//! - `application` - Registry, container and the decorating resolver
//! - `infrastructure` - Configuration, logging and container bootstrap

/// Domain layer - contract identity, instances and errors
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use seam_domain::*;
}

/// Application layer - registry, container and resolver
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use seam_application::*;
}

/// Infrastructure layer - config, logging and bootstrap
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use seam_infrastructure::*;
}

// Re-export commonly used domain types at the crate root
pub use domain::{
    BuildError, CapabilitySet, ConstructionOrigin, ContractFamily, ContractKey, Error,
    ImplementationType, Instance, Result, TypeToken,
};

// Re-export the registry and container at the crate root
pub use application::{
    Container, DecorationContext, DecoratorOrder, DuplicatePolicy, ModuleEntry,
    REGISTRATION_MODULES, Registry, RegistrationModule, RegistryOptions, ResolutionContext,
};

// Re-export bootstrap entry points at the crate root
pub use infrastructure::di::init_container;
pub use infrastructure::{AppConfig, ConfigLoader, ContainerBootstrap};
