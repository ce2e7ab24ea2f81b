//! # seam application layer
//!
//! The registration and resolution engine.
//!
//! ```text
//! Registry (build phase)             Container (query phase)
//! ──────────────────────             ───────────────────────
//! register(key, impl, caps, build)
//! register_decorator(family, ..)  →  freeze()  →  resolve_sequence(key)
//! install(module)                                    │
//!                                                    ▼
//!                                     per registration, in order:
//!                                     build base → fold decorators
//! ```
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`registry`] | Append-only registry, descriptors, options, registration modules |
//! | [`container`] | Sealed, queryable container |
//! | [`resolver`] | Per-registration build and decorator folding |

pub mod container;
pub mod registry;
pub mod resolver;

pub use container::{Container, ContainerSummary, DecoratorSummary, RegistrationSummary};
pub use registry::{
    DecoratorDescriptor, DecoratorHandle, DecoratorOrder, DuplicatePolicy, ModuleEntry,
    REGISTRATION_MODULES, RegistrationDescriptor, RegistrationHandle, RegistrationModule,
    Registry, RegistryOptions, install_linked_modules, list_linked_modules,
};
pub use resolver::{DecorationContext, ResolutionContext};
