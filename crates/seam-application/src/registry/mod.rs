//! Registry - build phase of the engine
//!
//! An append-only store of registrations and decorators. Every registration
//! gets the next order index from a monotonically increasing counter; that
//! index is the only tie-breaker for resolution order, whatever the
//! interleaving with registrations of other contracts.
//!
//! [`Registry::freeze`] seals the current contents into an immutable
//! [`Container`]. After that, every mutation fails with
//! `FrozenRegistryMutation` and the container is unaffected.
//!
//! ## Example
//!
//! ```ignore
//! let mut registry = Registry::new();
//! registry.register_type::<CommandHandler1>(handler_key, caps, |_| {
//!     Ok(Instance::new(Arc::new(CommandHandler1) as Arc<dyn Handler>))
//! })?;
//! registry.register_decorator(handler_family, |caps| caps.contains_family(cmd), wrap)?;
//! let container = registry.freeze()?;
//! let handlers = container.resolve_sequence(&handler_key)?;
//! ```

mod descriptor;
mod modules;
mod options;

use std::sync::Arc;

use seam_domain::constants::FIRST_ORDER_INDEX;
use seam_domain::{
    BuildError, CapabilitySet, ContractFamily, ContractKey, Error, ImplementationType, Instance,
    Result,
};
use tracing::{debug, info, warn};

use crate::container::Container;
use crate::resolver::{DecorationContext, ResolutionContext};

pub use descriptor::{
    BuildFn, DecorateFn, DecoratorDescriptor, DecoratorHandle, PredicateFn,
    RegistrationDescriptor, RegistrationHandle,
};
pub use modules::{
    ModuleEntry, REGISTRATION_MODULES, RegistrationModule, install_linked_modules,
    list_linked_modules,
};
pub use options::{DecoratorOrder, DuplicatePolicy, RegistryOptions};

/// Append-only registration store
pub struct Registry {
    options: RegistryOptions,
    registrations: Vec<Arc<RegistrationDescriptor>>,
    decorators: Vec<Arc<DecoratorDescriptor>>,
    next_order: u64,
    next_decorator_order: u64,
    sealed: Option<Container>,
}

/// Registry state captured before a module runs
#[derive(Clone, Copy)]
pub(crate) struct Checkpoint {
    registrations: usize,
    decorators: usize,
    next_order: u64,
    next_decorator_order: u64,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Create an empty registry with default options
    pub fn new() -> Self {
        Self::with_options(RegistryOptions::default())
    }

    /// Create an empty registry with the given options
    pub fn with_options(options: RegistryOptions) -> Self {
        Self {
            options,
            registrations: Vec::new(),
            decorators: Vec::new(),
            next_order: FIRST_ORDER_INDEX,
            next_decorator_order: FIRST_ORDER_INDEX,
            sealed: None,
        }
    }

    /// Options this registry was created with
    pub fn options(&self) -> &RegistryOptions {
        &self.options
    }

    /// Bind `key` to a construction recipe
    ///
    /// `key` is added to `capabilities` if missing. Fails with
    /// `DuplicateNotAllowed` when the duplicate policy forbids this binding, and
    /// with `FrozenRegistryMutation` after [`freeze`](Self::freeze).
    pub fn register<F>(
        &mut self,
        key: ContractKey,
        implementation: ImplementationType,
        mut capabilities: CapabilitySet,
        build: F,
    ) -> Result<RegistrationHandle>
    where
        F: Fn(&ResolutionContext<'_>) -> std::result::Result<Instance, BuildError>
            + Send
            + Sync
            + 'static,
    {
        self.ensure_open("register")?;
        self.check_duplicate(key, implementation)?;

        capabilities.insert(key);
        let order = self.next_order;
        self.next_order += 1;

        let descriptor = RegistrationDescriptor {
            key,
            implementation,
            capabilities,
            order,
            build: Box::new(build),
        };
        let handle = descriptor.handle();
        debug!(
            key = %key,
            implementation = %implementation,
            order,
            "Registered implementation"
        );
        self.registrations.push(Arc::new(descriptor));
        Ok(handle)
    }

    /// [`register`](Self::register) with the implementation type given as `I`
    ///
    /// Each registration binds exactly one key. An implementation serving two
    /// contracts needs one registration per contract, and each builds its own
    /// instance; list the other contracts in `capabilities` so decorator
    /// predicates can see them.
    pub fn register_type<I, F>(
        &mut self,
        key: ContractKey,
        capabilities: CapabilitySet,
        build: F,
    ) -> Result<RegistrationHandle>
    where
        I: ?Sized + 'static,
        F: Fn(&ResolutionContext<'_>) -> std::result::Result<Instance, BuildError>
            + Send
            + Sync
            + 'static,
    {
        self.register(key, ImplementationType::of::<I>(), capabilities, build)
    }

    /// Register an anonymous generic decorator over `target`
    ///
    /// Eligibility is not checked here; `predicate` is evaluated per candidate
    /// registration during resolution.
    pub fn register_decorator<P, F>(
        &mut self,
        target: ContractFamily,
        predicate: P,
        build: F,
    ) -> Result<DecoratorHandle>
    where
        P: Fn(&CapabilitySet) -> bool + Send + Sync + 'static,
        F: Fn(&DecorationContext<'_>, Instance) -> std::result::Result<Instance, BuildError>
            + Send
            + Sync
            + 'static,
    {
        self.push_decorator(None, target, Box::new(predicate), Box::new(build))
    }

    /// Register a named generic decorator over `target`
    pub fn register_named_decorator<P, F>(
        &mut self,
        name: impl Into<String>,
        target: ContractFamily,
        predicate: P,
        build: F,
    ) -> Result<DecoratorHandle>
    where
        P: Fn(&CapabilitySet) -> bool + Send + Sync + 'static,
        F: Fn(&DecorationContext<'_>, Instance) -> std::result::Result<Instance, BuildError>
            + Send
            + Sync
            + 'static,
    {
        self.push_decorator(Some(name.into()), target, Box::new(predicate), Box::new(build))
    }

    /// Run a registration module against this registry
    ///
    /// A module is installed whole or not at all: when `install` fails, every
    /// registration and decorator it added is removed and its order indices
    /// are released.
    pub fn install(&mut self, module: &dyn RegistrationModule) -> Result<()> {
        self.ensure_open("install")?;
        let checkpoint = self.checkpoint();
        if let Err(e) = module.install(self) {
            warn!(module = module.name(), error = %e, "Registration module failed, rolled back");
            self.rollback(checkpoint);
            return Err(e);
        }
        info!(
            module = module.name(),
            registrations = self.registrations.len() - checkpoint.registrations,
            decorators = self.decorators.len() - checkpoint.decorators,
            "Installed registration module"
        );
        Ok(())
    }

    pub(crate) fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            registrations: self.registrations.len(),
            decorators: self.decorators.len(),
            next_order: self.next_order,
            next_decorator_order: self.next_decorator_order,
        }
    }

    pub(crate) fn rollback(&mut self, checkpoint: Checkpoint) {
        self.registrations.truncate(checkpoint.registrations);
        self.decorators.truncate(checkpoint.decorators);
        self.next_order = checkpoint.next_order;
        self.next_decorator_order = checkpoint.next_decorator_order;
    }

    /// Seal the registry into an immutable container
    ///
    /// Calling this again returns the same container.
    pub fn freeze(&mut self) -> Result<Container> {
        if let Some(container) = &self.sealed {
            return Ok(container.clone());
        }

        let mut orders: Vec<u64> = self.registrations.iter().map(|r| r.order).collect();
        orders.sort_unstable();
        if let Some(pair) = orders.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(Error::internal(format!(
                "Registration order {} assigned twice",
                pair[0]
            )));
        }

        let container = Container::seal(
            self.options,
            self.registrations.clone(),
            self.decorators.clone(),
        );
        info!(
            registrations = self.registrations.len(),
            decorators = self.decorators.len(),
            contracts = container.keys().len(),
            "Registry frozen"
        );
        self.sealed = Some(container.clone());
        Ok(container)
    }

    /// Whether [`freeze`](Self::freeze) has been called
    pub fn is_frozen(&self) -> bool {
        self.sealed.is_some()
    }

    /// Number of registrations
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    /// Whether no registration exists
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Number of decorators
    pub fn decorator_count(&self) -> usize {
        self.decorators.len()
    }

    /// Registrations bound to `key`, in order
    pub fn registrations_for(&self, key: &ContractKey) -> Vec<RegistrationHandle> {
        self.registrations
            .iter()
            .filter(|r| r.key == *key)
            .map(|r| r.handle())
            .collect()
    }

    fn push_decorator(
        &mut self,
        name: Option<String>,
        target: ContractFamily,
        predicate: Box<PredicateFn>,
        build: Box<DecorateFn>,
    ) -> Result<DecoratorHandle> {
        self.ensure_open("register_decorator")?;

        let order = self.next_decorator_order;
        self.next_decorator_order += 1;

        let descriptor = DecoratorDescriptor {
            name,
            target,
            order,
            predicate,
            build,
        };
        let handle = descriptor.handle();
        debug!(
            decorator = descriptor.name(),
            target = %target,
            order,
            "Registered decorator"
        );
        self.decorators.push(Arc::new(descriptor));
        Ok(handle)
    }

    fn ensure_open(&self, operation: &'static str) -> Result<()> {
        if self.sealed.is_some() {
            warn!(operation, "Rejected mutation of a frozen registry");
            return Err(Error::frozen(operation));
        }
        Ok(())
    }

    fn check_duplicate(&self, key: ContractKey, implementation: ImplementationType) -> Result<()> {
        let rejected = match self.options.duplicate_policy {
            DuplicatePolicy::Allow => false,
            DuplicatePolicy::RejectSameKey => self.registrations.iter().any(|r| r.key == key),
            DuplicatePolicy::RejectSameImplementation => self
                .registrations
                .iter()
                .any(|r| r.key == key && r.implementation == implementation),
        };
        if rejected {
            warn!(key = %key, implementation = %implementation, "Rejected duplicate registration");
            return Err(Error::duplicate(key, implementation));
        }
        Ok(())
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("options", &self.options)
            .field("registrations", &self.registrations.len())
            .field("decorators", &self.decorators.len())
            .field("frozen", &self.is_frozen())
            .finish()
    }
}
