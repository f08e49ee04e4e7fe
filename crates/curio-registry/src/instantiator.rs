// Deterministic instantiator
//
// Maps derived instance addresses to live collection instances. Creation
// and initialization happen as one step, so no observer can reach a
// half-configured instance; a salt whose derived address is already
// occupied is a hard error.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::debug;

use curio_crypto::{derive_instance_address, InstanceAddress, Salt};
use curio_types::{RegistryError, RegistryResult};

use crate::collection::{CollectionHandle, CollectionInit, CollectionTemplate};

/// Content-addressed store of created instances, bound to one registry
/// identity and the currently active template.
pub struct Instantiator {
    registry_seed: [u8; 32],
    template: Arc<dyn CollectionTemplate>,
    instances: HashMap<InstanceAddress, CollectionHandle>,
}

impl Instantiator {
    /// Create an instantiator for the given registry seed and template.
    pub fn new(registry_seed: [u8; 32], template: Arc<dyn CollectionTemplate>) -> Self {
        Self {
            registry_seed,
            template,
            instances: HashMap::new(),
        }
    }

    /// Address a future `create_instance(salt)` would occupy.
    ///
    /// Pure: same salt and same template give the same answer before and
    /// after the instance exists.
    pub fn predict_address(&self, salt: &Salt) -> InstanceAddress {
        derive_instance_address(&self.template.fingerprint(), salt, &self.registry_seed)
    }

    /// Create and initialize an instance at the predicted address.
    ///
    /// Fails with `DuplicateSalt` if the derived address is occupied, and
    /// registers the instance only after initialization succeeds, so a
    /// failed call leaves no trace.
    pub fn create_instance(
        &mut self,
        salt: &Salt,
        init: CollectionInit,
    ) -> RegistryResult<(InstanceAddress, CollectionHandle)> {
        let address = self.predict_address(salt);
        if self.instances.contains_key(&address) {
            return Err(RegistryError::DuplicateSalt { address: address.to_hex_string() });
        }

        let mut instance = self.template.instantiate();
        instance.initialize(init)?;

        let handle: CollectionHandle = Arc::new(RwLock::new(instance));
        self.instances.insert(address, handle.clone());
        debug!(address = %address, "collection instance created");
        Ok((address, handle))
    }

    /// Look up a live instance by address.
    pub fn instance(&self, address: &InstanceAddress) -> Option<&CollectionHandle> {
        self.instances.get(address)
    }

    /// Swap the template used for subsequent creations.
    ///
    /// Existing instances are untouched; predictions change immediately.
    pub fn set_template(&mut self, template: Arc<dyn CollectionTemplate>) {
        self.template = template;
    }

    /// Fingerprint of the currently active template.
    pub fn template_fingerprint(&self) -> [u8; 32] {
        self.template.fingerprint()
    }
}
