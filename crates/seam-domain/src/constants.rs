//! Domain layer constants
//!
//! Defaults used by the registry and resolver. Infrastructure-specific
//! constants (file names, env prefixes) live in `seam_infrastructure::constants`.

// ============================================================================
// RESOLUTION CONSTANTS
// ============================================================================

/// Default bound on nested resolutions started from inside build recipes
pub const DEFAULT_MAX_RESOLUTION_DEPTH: usize = 32;

/// Name reported for decorators registered without an explicit name
pub const ANONYMOUS_DECORATOR_NAME: &str = "<anonymous decorator>";

/// First index of the registration and decorator order counters
pub const FIRST_ORDER_INDEX: u64 = 0;
