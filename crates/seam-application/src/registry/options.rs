//! Registry policies

use seam_domain::constants::DEFAULT_MAX_RESOLUTION_DEPTH;
use serde::{Deserialize, Serialize};

/// What happens when a contract receives another registration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Any number of registrations per contract
    #[default]
    Allow,
    /// Reject a second registration of the same implementation type for a contract
    RejectSameImplementation,
    /// Reject any second registration for a contract
    RejectSameKey,
}

/// Nesting order of decorators that apply to the same registration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecoratorOrder {
    /// The earliest-registered decorator wraps the base instance
    #[default]
    EarliestInnermost,
    /// The latest-registered decorator wraps the base instance
    LatestInnermost,
}

/// Options fixed when a registry is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryOptions {
    /// Duplicate registration policy
    pub duplicate_policy: DuplicatePolicy,
    /// Decorator nesting order
    pub decorator_order: DecoratorOrder,
    /// Bound on resolutions nested inside build recipes
    pub max_depth: usize,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            duplicate_policy: DuplicatePolicy::default(),
            decorator_order: DecoratorOrder::default(),
            max_depth: DEFAULT_MAX_RESOLUTION_DEPTH,
        }
    }
}

impl RegistryOptions {
    /// Set the duplicate policy
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Set the decorator order
    pub fn with_decorator_order(mut self, order: DecoratorOrder) -> Self {
        self.decorator_order = order;
        self
    }

    /// Set the nested resolution bound
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
