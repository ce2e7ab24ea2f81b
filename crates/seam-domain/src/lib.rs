//! # seam domain layer
//!
//! Identity types shared by every other crate of the workspace:
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`value_objects`] | Type tokens, contract keys, capability sets, instances |
//! | [`error`] | Domain error type and `Result` alias |
//! | [`constants`] | Engine-wide defaults |
//!
//! Nothing in here knows how registrations are stored or resolved; that lives
//! in `seam-application`.

pub mod constants;
pub mod error;
pub mod value_objects;

pub use error::{BuildError, ConstructionOrigin, Error, Result};
pub use value_objects::{
    CapabilitySet, ContractFamily, ContractKey, ImplementationType, Instance, TypeToken,
};
