//! Value objects describing contracts and the values bound to them

mod capability;
mod contract;
mod instance;
mod type_token;

pub use capability::CapabilitySet;
pub use contract::{ContractFamily, ContractKey, ImplementationType};
pub use instance::Instance;
pub use type_token::TypeToken;
