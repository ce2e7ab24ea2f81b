//! Resolver - per-registration construction and decoration
//!
//! For a contract key `K` the resolver walks the registrations bound to `K` in
//! ascending order and, for each registration `R` independently:
//!
//! 1. calls `R`'s build recipe to get a fresh base instance,
//! 2. selects the decorators targeting `K`'s family whose predicate accepts
//!    `R`'s capabilities, in decorator order,
//! 3. folds them over the base instance, each wrapping the previous result.
//!
//! Construction is keyed by registration, never by implementation type, so
//! output `i` always wraps the instance built from registration `i`. Nothing is
//! cached between registrations or between calls.

use std::any::Any;

use rayon::prelude::*;
use seam_domain::{
    CapabilitySet, ContractKey, Error, ImplementationType, Instance, Result, TypeToken,
};
use tracing::{debug, trace};

use crate::container::ContainerIndex;
use crate::registry::{DecoratorDescriptor, RegistrationDescriptor};

/// Resolution cursor over a sealed index
#[derive(Clone, Copy)]
pub(crate) struct Resolver<'c> {
    index: &'c ContainerIndex,
    depth: usize,
}

impl<'c> Resolver<'c> {
    pub(crate) fn new(index: &'c ContainerIndex) -> Self {
        Self { index, depth: 0 }
    }

    fn nested(self) -> Self {
        Self {
            index: self.index,
            depth: self.depth + 1,
        }
    }

    fn enter(&self, key: &ContractKey) -> Result<()> {
        let max_depth = self.index.options().max_depth;
        if self.depth > max_depth {
            return Err(Error::depth_exceeded(*key, max_depth));
        }
        Ok(())
    }

    /// Exactly one registration, decorated
    pub(crate) fn resolve_one(self, key: &ContractKey) -> Result<Instance> {
        self.enter(key)?;
        match self.index.registrations(key) {
            [] => Err(Error::not_registered(*key)),
            [registration] => self.resolve_registration(key, registration),
            many => Err(Error::ambiguous(*key, many.len())),
        }
    }

    /// Lowest-order registration, decorated
    pub(crate) fn resolve_first(self, key: &ContractKey) -> Result<Instance> {
        self.enter(key)?;
        let registration = self
            .index
            .registrations(key)
            .first()
            .ok_or_else(|| Error::not_registered(*key))?;
        self.resolve_registration(key, registration)
    }

    /// Every registration, decorated, in registration order
    pub(crate) fn resolve_sequence(self, key: &ContractKey) -> Result<Vec<Instance>> {
        self.enter(key)?;
        let registrations = self.index.registrations(key);
        debug!(
            key = %key,
            registrations = registrations.len(),
            depth = self.depth,
            "Resolving sequence"
        );
        registrations
            .iter()
            .map(|registration| self.resolve_registration(key, registration))
            .collect()
    }

    /// Same output as [`resolve_sequence`](Self::resolve_sequence), registrations built in parallel
    pub(crate) fn resolve_sequence_par(self, key: &ContractKey) -> Result<Vec<Instance>> {
        self.enter(key)?;
        let registrations = self.index.registrations(key);
        debug!(
            key = %key,
            registrations = registrations.len(),
            depth = self.depth,
            "Resolving sequence in parallel"
        );
        registrations
            .par_iter()
            .map(|registration| self.resolve_registration(key, registration))
            .collect()
    }

    fn resolve_registration(
        self,
        key: &ContractKey,
        registration: &'c RegistrationDescriptor,
    ) -> Result<Instance> {
        let context = ResolutionContext {
            resolver: self.nested(),
            registration,
        };
        let mut current = (registration.build)(&context)
            .map_err(|source| Error::construction_failed(registration.origin(), source))?;

        let applicable = self
            .index
            .decorators(key.family())
            .iter()
            .filter(|decorator| decorator.applies_to(&registration.capabilities));

        for (position, decorator) in applicable.enumerate() {
            let context = DecorationContext {
                resolver: self.nested(),
                key: *key,
                registration,
                decorator,
                position,
            };
            current = (decorator.build)(&context, current).map_err(|source| {
                Error::construction_failed(decorator.origin(registration.order), source)
            })?;
            trace!(
                key = %key,
                registration = registration.order,
                decorator = decorator.name(),
                position,
                "Applied decorator"
            );
        }

        Ok(current)
    }
}

pub(crate) fn downcast_sequence<T: Any + Clone>(instances: Vec<Instance>) -> Result<Vec<T>> {
    instances.iter().map(Instance::downcast::<T>).collect()
}

/// Handed to base build recipes
///
/// Gives access to the registration being built and to nested resolution
/// from the same container. Nested resolutions count towards the container's
/// `max_depth`.
pub struct ResolutionContext<'a> {
    resolver: Resolver<'a>,
    registration: &'a RegistrationDescriptor,
}

impl ResolutionContext<'_> {
    /// Registration being built
    pub fn registration(&self) -> &RegistrationDescriptor {
        self.registration
    }

    /// Nesting depth of resolutions started from this recipe
    pub fn depth(&self) -> usize {
        self.resolver.depth
    }

    /// Resolve exactly one instance of `key`
    pub fn resolve_one(&self, key: &ContractKey) -> Result<Instance> {
        self.resolver.resolve_one(key)
    }

    /// Resolve the first registration of `key`
    pub fn resolve_first(&self, key: &ContractKey) -> Result<Instance> {
        self.resolver.resolve_first(key)
    }

    /// Resolve every registration of `key`
    pub fn resolve_sequence(&self, key: &ContractKey) -> Result<Vec<Instance>> {
        self.resolver.resolve_sequence(key)
    }

    /// Resolve exactly one instance of `key` as `T`
    pub fn resolve_one_as<T: Any + Clone>(&self, key: &ContractKey) -> Result<T> {
        self.resolve_one(key)?.downcast::<T>()
    }

    /// Resolve every registration of `key` as `T`
    pub fn resolve_sequence_as<T: Any + Clone>(&self, key: &ContractKey) -> Result<Vec<T>> {
        downcast_sequence(self.resolve_sequence(key)?)
    }
}

/// Handed to decorator build recipes
///
/// Carries the closing type argument of the contract being resolved, so one
/// generic decorator recipe can serve every `Family<_>` contract.
pub struct DecorationContext<'a> {
    resolver: Resolver<'a>,
    key: ContractKey,
    registration: &'a RegistrationDescriptor,
    decorator: &'a DecoratorDescriptor,
    position: usize,
}

impl DecorationContext<'_> {
    /// Type argument of the contract being resolved
    pub fn argument(&self) -> TypeToken {
        self.key.argument()
    }

    /// Contract being resolved
    pub fn key(&self) -> ContractKey {
        self.key
    }

    /// Implementation type of the decorated registration
    pub fn implementation(&self) -> ImplementationType {
        self.registration.implementation
    }

    /// Capabilities of the decorated registration
    pub fn capabilities(&self) -> &CapabilitySet {
        &self.registration.capabilities
    }

    /// Order index of the decorated registration
    pub fn registration_order(&self) -> u64 {
        self.registration.order
    }

    /// Name of the decorator being applied
    pub fn decorator_name(&self) -> &str {
        self.decorator.name()
    }

    /// 0 for the decorator wrapping the base instance, then 1, 2, ...
    pub fn position(&self) -> usize {
        self.position
    }

    /// Resolve exactly one instance of `key`
    pub fn resolve_one(&self, key: &ContractKey) -> Result<Instance> {
        self.resolver.resolve_one(key)
    }

    /// Resolve the first registration of `key`
    pub fn resolve_first(&self, key: &ContractKey) -> Result<Instance> {
        self.resolver.resolve_first(key)
    }

    /// Resolve every registration of `key`
    pub fn resolve_sequence(&self, key: &ContractKey) -> Result<Vec<Instance>> {
        self.resolver.resolve_sequence(key)
    }
}

