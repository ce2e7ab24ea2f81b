//! Contract identity
//!
//! A contract is an abstract service parameterized by one type argument, e.g.
//! `Handler<Command>`. The family (`Handler`) is identified by a marker type,
//! usually the trait object itself (`dyn Handler<()>`) or an uninhabited enum.

use std::fmt;

use serde::Serialize;

use super::TypeToken;

/// Open contract, without its type argument
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ContractFamily(TypeToken);

impl ContractFamily {
    /// Family identified by marker type `M`
    pub fn of<M: ?Sized + 'static>() -> Self {
        Self(TypeToken::of::<M>())
    }

    /// Family identified by an existing token
    pub fn from_token(token: TypeToken) -> Self {
        Self(token)
    }

    /// Marker type token
    pub fn token(&self) -> TypeToken {
        self.0
    }

    /// Short display name of the family
    pub fn name(&self) -> &'static str {
        self.0.short_name()
    }

    /// Close this family over argument `A`
    pub fn close<A: ?Sized + 'static>(self) -> ContractKey {
        ContractKey::new(self, TypeToken::of::<A>())
    }
}

impl fmt::Debug for ContractFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContractFamily({:?})", self.0)
    }
}

impl fmt::Display for ContractFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Closed contract: family plus concrete type argument
///
/// Two keys are equal iff both family and argument are equal.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ContractKey {
    family: ContractFamily,
    argument: TypeToken,
}

impl ContractKey {
    /// Create a key from its parts
    pub fn new(family: ContractFamily, argument: TypeToken) -> Self {
        Self { family, argument }
    }

    /// Key for family marker `F` closed over argument `A`
    pub fn of<F: ?Sized + 'static, A: ?Sized + 'static>() -> Self {
        Self::new(ContractFamily::of::<F>(), TypeToken::of::<A>())
    }

    /// The open contract
    pub fn family(&self) -> ContractFamily {
        self.family
    }

    /// The type argument closing the contract
    pub fn argument(&self) -> TypeToken {
        self.argument
    }
}

impl fmt::Debug for ContractKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContractKey({self})")
    }
}

impl fmt::Display for ContractKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}<{}>", self.family, self.argument)
    }
}

/// Concrete type registered behind a contract
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ImplementationType(TypeToken);

impl ImplementationType {
    /// Implementation type `T`
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self(TypeToken::of::<T>())
    }

    /// Underlying token
    pub fn token(&self) -> TypeToken {
        self.0
    }

    /// Short display name
    pub fn name(&self) -> &'static str {
        self.0.short_name()
    }
}

impl fmt::Debug for ImplementationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ImplementationType({:?})", self.0)
    }
}

impl fmt::Display for ImplementationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
