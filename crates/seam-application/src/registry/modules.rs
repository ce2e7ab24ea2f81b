//! Registration modules
//!
//! Groups of registrations installed together. A module is either a value
//! implementing [`RegistrationModule`] passed to [`Registry::install`], or a
//! static [`ModuleEntry`] submitted to the [`REGISTRATION_MODULES`] linkme
//! distributed slice and picked up by [`install_linked_modules`].
//!
//! ```ignore
//! #[linkme::distributed_slice(seam_application::REGISTRATION_MODULES)]
//! static COMMAND_HANDLERS: ModuleEntry = ModuleEntry {
//!     name: "command-handlers",
//!     description: "Command handlers and their logging decorator",
//!     install: install_command_handlers,
//! };
//! ```

use seam_domain::{Error, Result};
use tracing::info;

use super::Registry;

/// A named group of registrations
pub trait RegistrationModule {
    /// Module name for diagnostics
    fn name(&self) -> &str;

    /// Add this module's registrations and decorators to `registry`
    fn install(&self, registry: &mut Registry) -> Result<()>;
}

/// Registry entry for linked registration modules
///
/// Each module registers itself with
/// `#[linkme::distributed_slice(REGISTRATION_MODULES)]`.
pub struct ModuleEntry {
    /// Unique module name
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Installer function
    pub install: fn(&mut Registry) -> Result<()>,
}

impl RegistrationModule for ModuleEntry {
    fn name(&self) -> &str {
        self.name
    }

    fn install(&self, registry: &mut Registry) -> Result<()> {
        (self.install)(registry)
    }
}

// Auto-collection via linkme distributed slices - modules submit entries at compile time
#[linkme::distributed_slice]
pub static REGISTRATION_MODULES: [ModuleEntry] = [..];

/// Install linked modules into `registry`
///
/// Modules are installed sorted by name so the resulting order indices do not
/// depend on link order. With `only = Some(names)`, just those modules are
/// installed and an unknown name is a configuration error. If any module
/// fails, the modules installed before it in this call are removed as well.
///
/// # Returns
/// Names of the installed modules, in installation order
pub fn install_linked_modules(
    registry: &mut Registry,
    only: Option<&[String]>,
) -> Result<Vec<&'static str>> {
    let mut entries: Vec<&'static ModuleEntry> = REGISTRATION_MODULES.iter().collect();
    entries.sort_by_key(|entry| entry.name);

    if let Some(names) = only {
        if let Some(unknown) = names
            .iter()
            .find(|name| !entries.iter().any(|entry| entry.name == name.as_str()))
        {
            let available: Vec<&str> = entries.iter().map(|e| e.name).collect();
            return Err(Error::configuration(format!(
                "Unknown registration module '{}'. Available modules: {:?}",
                unknown, available
            )));
        }
        entries.retain(|entry| names.iter().any(|name| name == entry.name));
    }

    let checkpoint = registry.checkpoint();
    let mut installed = Vec::with_capacity(entries.len());
    for entry in entries {
        if let Err(e) = registry.install(entry) {
            registry.rollback(checkpoint);
            return Err(e);
        }
        installed.push(entry.name);
    }
    info!(count = installed.len(), "Installed linked registration modules");
    Ok(installed)
}

/// List all linked registration modules as (name, description) tuples
pub fn list_linked_modules() -> Vec<(&'static str, &'static str)> {
    let mut modules: Vec<_> = REGISTRATION_MODULES
        .iter()
        .map(|e| (e.name, e.description))
        .collect();
    modules.sort_by_key(|(name, _)| *name);
    modules
}
