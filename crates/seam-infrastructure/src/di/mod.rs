//! Container bootstrap
//!
//! Wiring only: builds a registry from configuration, installs registration
//! modules and freezes it. Registration semantics live in `seam-application`.
//!
//! ```text
//! AppConfig ──► RegistryOptions ──► Registry
//!                                      │  install_linked_modules (linkme)
//!                                      │  install(explicit modules)
//!                                      ▼
//!                                   freeze() ──► Container
//! ```

pub mod bootstrap;

pub use bootstrap::{ContainerBootstrap, init_container};
