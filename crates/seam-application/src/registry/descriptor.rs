//! Registration and decorator descriptors
//!
//! Descriptors are created by the [`Registry`](super::Registry) and never
//! mutated afterwards. The container shares them behind `Arc`s.

use std::fmt;

use seam_domain::constants::ANONYMOUS_DECORATOR_NAME;
use seam_domain::{
    BuildError, CapabilitySet, ConstructionOrigin, ContractFamily, ContractKey,
    ImplementationType, Instance,
};

use crate::resolver::{DecorationContext, ResolutionContext};

/// Base construction recipe
pub type BuildFn =
    dyn Fn(&ResolutionContext<'_>) -> Result<Instance, BuildError> + Send + Sync + 'static;

/// Decorator construction recipe: wraps `inner`
pub type DecorateFn = dyn Fn(&DecorationContext<'_>, Instance) -> Result<Instance, BuildError>
    + Send
    + Sync
    + 'static;

/// Decorator eligibility test over a candidate's capabilities
pub type PredicateFn = dyn Fn(&CapabilitySet) -> bool + Send + Sync + 'static;

/// One binding of a contract to a construction recipe
pub struct RegistrationDescriptor {
    pub(crate) key: ContractKey,
    pub(crate) implementation: ImplementationType,
    pub(crate) capabilities: CapabilitySet,
    pub(crate) order: u64,
    pub(crate) build: Box<BuildFn>,
}

impl RegistrationDescriptor {
    /// Contract this registration is bound to
    pub fn key(&self) -> ContractKey {
        self.key
    }

    /// Declared implementation type
    pub fn implementation(&self) -> ImplementationType {
        self.implementation
    }

    /// Declared capabilities, always including [`key`](Self::key)
    pub fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    /// Registration order index
    pub fn order(&self) -> u64 {
        self.order
    }

    /// Handle identifying this registration
    pub fn handle(&self) -> RegistrationHandle {
        RegistrationHandle {
            order: self.order,
            key: self.key,
            implementation: self.implementation,
        }
    }

    pub(crate) fn origin(&self) -> ConstructionOrigin {
        ConstructionOrigin::Registration {
            order: self.order,
            key: self.key,
            implementation: self.implementation,
        }
    }
}

impl fmt::Debug for RegistrationDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationDescriptor")
            .field("key", &self.key)
            .field("implementation", &self.implementation)
            .field("capabilities", &self.capabilities)
            .field("order", &self.order)
            .finish_non_exhaustive()
    }
}

/// Generic decorator bound to an open contract family
pub struct DecoratorDescriptor {
    pub(crate) name: Option<String>,
    pub(crate) target: ContractFamily,
    pub(crate) order: u64,
    pub(crate) predicate: Box<PredicateFn>,
    pub(crate) build: Box<DecorateFn>,
}

impl DecoratorDescriptor {
    /// Name given at registration, or the anonymous placeholder
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(ANONYMOUS_DECORATOR_NAME)
    }

    /// Contract family the decorator wraps
    pub fn target(&self) -> ContractFamily {
        self.target
    }

    /// Decorator order index (independent of registration orders)
    pub fn order(&self) -> u64 {
        self.order
    }

    /// Whether this decorator applies to a candidate with `capabilities`
    pub fn applies_to(&self, capabilities: &CapabilitySet) -> bool {
        (self.predicate)(capabilities)
    }

    /// Handle identifying this decorator
    pub fn handle(&self) -> DecoratorHandle {
        DecoratorHandle {
            order: self.order,
            target: self.target,
        }
    }

    pub(crate) fn origin(&self, registration_order: u64) -> ConstructionOrigin {
        ConstructionOrigin::Decorator {
            name: self.name().to_string(),
            target: self.target,
            registration_order,
        }
    }
}

impl fmt::Debug for DecoratorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecoratorDescriptor")
            .field("name", &self.name())
            .field("target", &self.target)
            .field("order", &self.order)
            .finish_non_exhaustive()
    }
}

/// Identity of a registration, returned by `register`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegistrationHandle {
    order: u64,
    key: ContractKey,
    implementation: ImplementationType,
}

impl RegistrationHandle {
    /// Registration order index
    pub fn order(&self) -> u64 {
        self.order
    }

    /// Contract the registration is bound to
    pub fn key(&self) -> ContractKey {
        self.key
    }

    /// Declared implementation type
    pub fn implementation(&self) -> ImplementationType {
        self.implementation
    }
}

/// Identity of a decorator, returned by `register_decorator`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecoratorHandle {
    order: u64,
    target: ContractFamily,
}

impl DecoratorHandle {
    /// Decorator order index
    pub fn order(&self) -> u64 {
        self.order
    }

    /// Targeted contract family
    pub fn target(&self) -> ContractFamily {
        self.target
    }
}
