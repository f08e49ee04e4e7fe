// Deterministic instance address derivation

use crate::instance::InstanceAddress;
use crate::salt::Salt;

/// Domain separator so instance addresses can never collide with other
/// blake3 uses of the same inputs.
const DERIVATION_DOMAIN: &[u8] = b"curio/instance-address/v1";

/// Derive the address of a (possibly not-yet-created) instance.
///
/// The derivation is a pure function of the template fingerprint, the
/// caller-supplied salt, and the seed identifying the deriving registry.
/// Calling it before and after the instance is created yields the same
/// address; changing any one input yields a different address, up to hash
/// collisions.
pub fn derive_instance_address(
    template_fingerprint: &[u8; 32],
    salt: &Salt,
    registry_seed: &[u8; 32],
) -> InstanceAddress {
    let mut hasher = blake3::Hasher::new();
    hasher.update(DERIVATION_DOMAIN);
    hasher.update(template_fingerprint);
    hasher.update(salt.as_bytes());
    hasher.update(registry_seed);
    InstanceAddress::new(*hasher.finalize().as_bytes())
}
