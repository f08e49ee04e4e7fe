// Registry error framework
// Every error is synchronous, rejects the whole call, and carries the
// violated bound or offending id so it can be surfaced verbatim.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::EntryId;

/// Error code structure for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorCode(pub u32);

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

/// Registry error codes
pub mod codes {
    use super::ErrorCode;

    // Registry error codes start with 1000
    pub const DUPLICATE_SALT: ErrorCode = ErrorCode(1001);
    pub const PAGE_TOO_LARGE: ErrorCode = ErrorCode(1002);
    pub const OUT_OF_BOUNDS: ErrorCode = ErrorCode(1003);
    pub const LENGTH_MISMATCH: ErrorCode = ErrorCode(1004);
    pub const UNKNOWN_ENTRY: ErrorCode = ErrorCode(1005);
    pub const PERMISSION_DENIED: ErrorCode = ErrorCode(1006);
    pub const ALREADY_INITIALIZED: ErrorCode = ErrorCode(1007);
    pub const TOKEN_NOT_FOUND: ErrorCode = ErrorCode(1008);
    pub const TOKEN_ALREADY_MINTED: ErrorCode = ErrorCode(1009);
}

/// Errors produced by the registry core and its query surface
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The salt has already been consumed against the current template,
    /// so the derived instance address is occupied.
    #[error("duplicate salt: instance already exists at {address}")]
    DuplicateSalt {
        /// Hex form of the occupied instance address
        address: String,
    },

    /// A requested page size or per-call input count exceeds the cap.
    #[error("page too large: requested {requested}, cap is {cap}")]
    PageTooLarge { requested: u64, cap: u64 },

    /// A requested page starts at or beyond the available total.
    #[error("page out of bounds: page {page} of size {size} over {total} items")]
    OutOfBounds { page: u64, size: u64, total: u64 },

    /// Parallel input arrays of differing length.
    #[error("length mismatch: ids={ids}, pages={pages}, sizes={sizes}")]
    LengthMismatch { ids: usize, pages: usize, sizes: usize },

    /// A referenced entry id has no created collection behind it.
    #[error("unknown entry: no collection exists for id {id}")]
    UnknownEntry { id: EntryId },

    /// Caller lacks the required administrative or top-authority role.
    #[error("permission denied: {caller} is not {required}")]
    PermissionDenied {
        /// The rejected caller identity
        caller: String,
        /// The role the operation requires
        required: &'static str,
    },

    /// The collection's one-shot initialization entry was called twice.
    #[error("collection already initialized for entry {id}")]
    AlreadyInitialized { id: EntryId },

    /// An ownership token lookup referenced an unminted id.
    #[error("ownership token {id} has not been minted")]
    TokenNotFound { id: EntryId },

    /// Mint was asked to reuse an id. The registry's monotonic id
    /// assignment makes this unreachable unless an invariant broke.
    #[error("ownership token {id} is already minted")]
    TokenAlreadyMinted { id: EntryId },
}

impl RegistryError {
    /// Error code for this error
    pub fn code(&self) -> ErrorCode {
        use codes::*;
        match self {
            RegistryError::DuplicateSalt { .. } => DUPLICATE_SALT,
            RegistryError::PageTooLarge { .. } => PAGE_TOO_LARGE,
            RegistryError::OutOfBounds { .. } => OUT_OF_BOUNDS,
            RegistryError::LengthMismatch { .. } => LENGTH_MISMATCH,
            RegistryError::UnknownEntry { .. } => UNKNOWN_ENTRY,
            RegistryError::PermissionDenied { .. } => PERMISSION_DENIED,
            RegistryError::AlreadyInitialized { .. } => ALREADY_INITIALIZED,
            RegistryError::TokenNotFound { .. } => TOKEN_NOT_FOUND,
            RegistryError::TokenAlreadyMinted { .. } => TOKEN_ALREADY_MINTED,
        }
    }
}

/// Convenient Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;
