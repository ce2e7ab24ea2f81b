//! Bootstrap from configuration

use seam_application::{
    Container, Registry, RegistryOptions, RegistrationModule, install_linked_modules,
};
use seam_domain::error::Result;
use tracing::info;

use crate::config::AppConfig;
use crate::logging::init_logging;

/// Builds a frozen container from configuration and modules
pub struct ContainerBootstrap {
    config: AppConfig,
    modules: Vec<Box<dyn RegistrationModule>>,
}

impl ContainerBootstrap {
    /// Create a bootstrap for `config`
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            modules: Vec::new(),
        }
    }

    /// Add a module installed after the linked ones, in call order
    pub fn with_module<M: RegistrationModule + 'static>(mut self, module: M) -> Self {
        self.modules.push(Box::new(module));
        self
    }

    /// Configuration in use
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Registry options derived from configuration
    pub fn registry_options(&self) -> RegistryOptions {
        RegistryOptions::from(&self.config.resolution)
    }

    /// Create, populate and freeze the registry
    pub fn build(self) -> Result<Container> {
        let mut registry = Registry::with_options(self.registry_options());

        if self.config.resolution.scan_linked_modules {
            let installed =
                install_linked_modules(&mut registry, self.config.resolution.modules.as_deref())?;
            info!(modules = ?installed, "Linked registration modules installed");
        }

        for module in &self.modules {
            registry.install(module.as_ref())?;
        }

        let container = registry.freeze()?;
        info!(
            registrations = container.len(),
            decorators = container.decorator_count(),
            contracts = container.keys().len(),
            "Container ready"
        );
        Ok(container)
    }
}

/// Initialize logging, then bootstrap a container from `config`
pub fn init_container(config: AppConfig) -> Result<Container> {
    init_logging(&config.logging)?;
    ContainerBootstrap::new(config).build()
}
