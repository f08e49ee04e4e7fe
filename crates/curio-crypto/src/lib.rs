// Curio cryptographic identity primitives
//
// This crate provides the deterministic identity derivation used by the
// registry's instantiator: a salt type, a content-derived instance address,
// and the pure derivation function that maps
// (template fingerprint, salt, registry seed) to an address before any
// instance exists.

mod derive;
mod instance;
mod salt;

pub use derive::derive_instance_address;
pub use instance::{InstanceAddress, InstanceAddressError};
pub use salt::Salt;
