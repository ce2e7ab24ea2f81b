//! Resolution configuration types

use seam_application::{DecoratorOrder, DuplicatePolicy, RegistryOptions};
use seam_domain::constants::DEFAULT_MAX_RESOLUTION_DEPTH;
use serde::{Deserialize, Serialize};

/// Registry policies and module selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolutionConfig {
    /// Duplicate registration policy
    pub duplicate_policy: DuplicatePolicy,

    /// Decorator nesting order
    pub decorator_order: DecoratorOrder,

    /// Bound on resolutions nested inside build recipes
    pub max_depth: usize,

    /// Install linked registration modules at bootstrap
    pub scan_linked_modules: bool,

    /// Restrict linked modules to these names (all when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modules: Option<Vec<String>>,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            duplicate_policy: DuplicatePolicy::default(),
            decorator_order: DecoratorOrder::default(),
            max_depth: DEFAULT_MAX_RESOLUTION_DEPTH,
            scan_linked_modules: true,
            modules: None,
        }
    }
}

impl From<&ResolutionConfig> for RegistryOptions {
    fn from(config: &ResolutionConfig) -> Self {
        RegistryOptions::default()
            .with_duplicate_policy(config.duplicate_policy)
            .with_decorator_order(config.decorator_order)
            .with_max_depth(config.max_depth)
    }
}
