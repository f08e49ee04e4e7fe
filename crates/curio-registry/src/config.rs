// Registry configuration

use serde::{Deserialize, Serialize};

use curio_types::Address;

use crate::pagination::MAX_PAGE_SIZE;

/// Construction-time configuration for a [`Registry`](crate::Registry).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Deployer identity; initially holds both the admin role and the
    /// top-level authority.
    pub deployer: Address,
    /// Contract-level descriptive metadata URI
    pub contract_uri: String,
    /// Seed fixing this registry's identity for address derivation.
    /// Random when absent; set it to make predictions reproducible across
    /// registry rebuilds.
    #[serde(default)]
    pub seed: Option<[u8; 32]>,
    /// Per-call pagination cap
    #[serde(default = "default_page_cap")]
    pub page_cap: u64,
}

fn default_page_cap() -> u64 {
    MAX_PAGE_SIZE
}

impl RegistryConfig {
    /// Config with a random seed and the default page cap.
    pub fn new(deployer: Address, contract_uri: impl Into<String>) -> Self {
        Self {
            deployer,
            contract_uri: contract_uri.into(),
            seed: None,
            page_cap: MAX_PAGE_SIZE,
        }
    }

    /// Fix the derivation seed.
    pub fn with_seed(mut self, seed: [u8; 32]) -> Self {
        self.seed = Some(seed);
        self
    }
}
