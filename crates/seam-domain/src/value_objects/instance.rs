//! Opaque resolved values

use std::any::{self, Any};
use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};

/// A constructed value conforming to some contract
///
/// Cloning is cheap and shares the value. Trait-object contracts are stored as
/// `Arc<dyn Trait>` so they can be recovered with [`Instance::downcast`].
/// Instances carry no identity beyond themselves; the engine never
/// deduplicates them by type.
#[derive(Clone)]
pub struct Instance {
    value: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Instance {
    /// Wrap a value
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            value: Arc::new(value),
            type_name: any::type_name::<T>(),
        }
    }

    /// Rust type name of the stored value
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Whether the stored value is a `T`
    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }

    /// Borrow the stored value as `T`
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// Clone the stored value out as `T`
    pub fn downcast<T: Any + Clone>(&self) -> Result<T> {
        self.downcast_ref::<T>()
            .cloned()
            .ok_or(Error::InstanceTypeMismatch {
                expected: any::type_name::<T>(),
                actual: self.type_name,
            })
    }

    /// Whether both handles share the same underlying value
    pub fn ptr_eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.value), Arc::as_ptr(&other.value))
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Instance").field(&self.type_name).finish()
    }
}
