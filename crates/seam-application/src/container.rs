//! Container - query phase of the engine
//!
//! The sealed view produced by [`Registry::freeze`](crate::Registry::freeze).
//! Registrations are indexed by contract family, then by type argument, each
//! list kept in ascending order. Decorators are indexed by target family in
//! nesting order (innermost first).
//!
//! The container is immutable and cheap to clone; it can be shared across
//! threads and resolved from concurrently without synchronization.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use seam_domain::{
    CapabilitySet, ContractFamily, ContractKey, ImplementationType, Instance, Result, TypeToken,
};
use serde::Serialize;

use crate::registry::{
    DecoratorDescriptor, DecoratorOrder, RegistrationDescriptor, RegistryOptions,
};
use crate::resolver::{Resolver, downcast_sequence};

/// Immutable lookup structure shared by all clones of a container
pub(crate) struct ContainerIndex {
    options: RegistryOptions,
    registrations: HashMap<ContractFamily, HashMap<TypeToken, Vec<Arc<RegistrationDescriptor>>>>,
    decorators: HashMap<ContractFamily, Vec<Arc<DecoratorDescriptor>>>,
    registration_count: usize,
    decorator_count: usize,
}

impl ContainerIndex {
    pub(crate) fn options(&self) -> &RegistryOptions {
        &self.options
    }

    pub(crate) fn registrations(&self, key: &ContractKey) -> &[Arc<RegistrationDescriptor>] {
        self.registrations
            .get(&key.family())
            .and_then(|by_argument| by_argument.get(&key.argument()))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub(crate) fn decorators(&self, family: ContractFamily) -> &[Arc<DecoratorDescriptor>] {
        self.decorators
            .get(&family)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Sealed, queryable registry
#[derive(Clone)]
pub struct Container {
    index: Arc<ContainerIndex>,
}

impl Container {
    pub(crate) fn seal(
        options: RegistryOptions,
        mut registrations: Vec<Arc<RegistrationDescriptor>>,
        mut decorators: Vec<Arc<DecoratorDescriptor>>,
    ) -> Self {
        registrations.sort_by_key(|r| r.order);
        decorators.sort_by_key(|d| d.order);

        let registration_count = registrations.len();
        let decorator_count = decorators.len();

        let mut by_family: HashMap<
            ContractFamily,
            HashMap<TypeToken, Vec<Arc<RegistrationDescriptor>>>,
        > = HashMap::new();
        for registration in registrations {
            by_family
                .entry(registration.key.family())
                .or_default()
                .entry(registration.key.argument())
                .or_default()
                .push(registration);
        }

        let mut by_target: HashMap<ContractFamily, Vec<Arc<DecoratorDescriptor>>> =
            HashMap::new();
        for decorator in decorators {
            by_target.entry(decorator.target).or_default().push(decorator);
        }
        if options.decorator_order == DecoratorOrder::LatestInnermost {
            by_target.values_mut().for_each(|chain| chain.reverse());
        }

        Self {
            index: Arc::new(ContainerIndex {
                options,
                registrations: by_family,
                decorators: by_target,
                registration_count,
                decorator_count,
            }),
        }
    }

    /// Options inherited from the registry
    pub fn options(&self) -> &RegistryOptions {
        &self.index.options
    }

    /// Resolve the single registration of `key`
    ///
    /// Fails with `NotRegistered` when there is none and with
    /// `AmbiguousRegistration` when there is more than one.
    pub fn resolve_one(&self, key: &ContractKey) -> Result<Instance> {
        Resolver::new(&self.index).resolve_one(key)
    }

    /// Resolve the lowest-order registration of `key`, ignoring any others
    pub fn resolve_first(&self, key: &ContractKey) -> Result<Instance> {
        Resolver::new(&self.index).resolve_first(key)
    }

    /// Resolve every registration of `key`, decorated, in registration order
    ///
    /// An unregistered key yields an empty sequence. Any build or decorator
    /// failure fails the whole call.
    pub fn resolve_sequence(&self, key: &ContractKey) -> Result<Vec<Instance>> {
        Resolver::new(&self.index).resolve_sequence(key)
    }

    /// [`resolve_sequence`](Self::resolve_sequence) with registrations built on the rayon pool
    pub fn resolve_sequence_par(&self, key: &ContractKey) -> Result<Vec<Instance>> {
        Resolver::new(&self.index).resolve_sequence_par(key)
    }

    /// [`resolve_one`](Self::resolve_one), downcast to `T`
    pub fn resolve_one_as<T: Any + Clone>(&self, key: &ContractKey) -> Result<T> {
        self.resolve_one(key)?.downcast::<T>()
    }

    /// [`resolve_sequence`](Self::resolve_sequence), each instance downcast to `T`
    pub fn resolve_sequence_as<T: Any + Clone>(&self, key: &ContractKey) -> Result<Vec<T>> {
        downcast_sequence(self.resolve_sequence(key)?)
    }

    /// Registrations bound to `key`, in order
    pub fn registrations(&self, key: &ContractKey) -> &[Arc<RegistrationDescriptor>] {
        self.index.registrations(key)
    }

    /// Decorators targeting `family`, innermost first
    pub fn decorators(&self, family: ContractFamily) -> &[Arc<DecoratorDescriptor>] {
        self.index.decorators(family)
    }

    /// Whether `key` has at least one registration
    pub fn is_registered(&self, key: &ContractKey) -> bool {
        !self.index.registrations(key).is_empty()
    }

    /// Every contract key with registrations, sorted
    pub fn keys(&self) -> Vec<ContractKey> {
        let mut keys: Vec<ContractKey> = self
            .index
            .registrations
            .iter()
            .flat_map(|(family, by_argument)| {
                by_argument
                    .keys()
                    .map(move |argument| ContractKey::new(*family, *argument))
            })
            .collect();
        keys.sort();
        keys
    }

    /// Total number of registrations
    pub fn len(&self) -> usize {
        self.index.registration_count
    }

    /// Whether the container holds no registration
    pub fn is_empty(&self) -> bool {
        self.index.registration_count == 0
    }

    /// Total number of decorators
    pub fn decorator_count(&self) -> usize {
        self.index.decorator_count
    }

    /// Serializable description of the container contents, sorted by order
    pub fn summary(&self) -> ContainerSummary {
        let mut registrations: Vec<RegistrationSummary> = self
            .index
            .registrations
            .values()
            .flat_map(HashMap::values)
            .flatten()
            .map(|r| RegistrationSummary {
                order: r.order,
                key: r.key,
                implementation: r.implementation,
                capabilities: r.capabilities.clone(),
            })
            .collect();
        registrations.sort_by_key(|r| r.order);

        let mut decorators: Vec<DecoratorSummary> = self
            .index
            .decorators
            .values()
            .flatten()
            .map(|d| DecoratorSummary {
                order: d.order,
                name: d.name().to_string(),
                target: d.target,
            })
            .collect();
        decorators.sort_by_key(|d| d.order);

        ContainerSummary {
            decorator_order: self.index.options.decorator_order,
            registrations,
            decorators,
        }
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("registrations", &self.index.registration_count)
            .field("decorators", &self.index.decorator_count)
            .field("options", &self.index.options)
            .finish()
    }
}

/// Description of a container, for diagnostics and admin output
#[derive(Debug, Clone, Serialize)]
pub struct ContainerSummary {
    /// Decorator nesting policy in effect
    pub decorator_order: DecoratorOrder,
    /// All registrations, by order
    pub registrations: Vec<RegistrationSummary>,
    /// All decorators, by order
    pub decorators: Vec<DecoratorSummary>,
}

/// One registration in a [`ContainerSummary`]
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationSummary {
    /// Registration order index
    pub order: u64,
    /// Contract key
    pub key: ContractKey,
    /// Implementation type
    pub implementation: ImplementationType,
    /// Declared capabilities
    pub capabilities: CapabilitySet,
}

/// One decorator in a [`ContainerSummary`]
#[derive(Debug, Clone, Serialize)]
pub struct DecoratorSummary {
    /// Decorator order index
    pub order: u64,
    /// Decorator name
    pub name: String,
    /// Targeted family
    pub target: ContractFamily,
}

impl std::fmt::Display for ContainerSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Registrations:")?;
        for r in &self.registrations {
            writeln!(f, "  #{} {} as {}", r.order, r.implementation, r.key)?;
        }
        writeln!(f, "Decorators ({:?}):", self.decorator_order)?;
        for d in &self.decorators {
            writeln!(f, "  #{} {} over {}<_>", d.order, d.name, d.target)?;
        }
        Ok(())
    }
}
