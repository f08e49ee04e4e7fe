// Curio shared types
// Identity primitives and the error framework used across the workspace.

mod address;
mod error;

pub use address::Address;
pub use error::{codes, ErrorCode, RegistryError, RegistryResult};

/// Registry-scoped entry identifier.
///
/// Assigned monotonically from 0 by the registry core and never reused. The
/// same integer also identifies the ownership token minted for the entry.
pub type EntryId = u64;
