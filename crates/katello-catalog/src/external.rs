//! Registry of externally declared edge endpoints.
//!
//! The hosting environment realizes these nodes; the compiler only
//! references them by identity when building edges. The registry is
//! read-only during a compilation pass.

use std::collections::BTreeSet;

use katello_common::constants;
use katello_common::types::ExternalId;
use serde::{Deserialize, Serialize};

/// Read-only set of external identities usable as edge endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalRegistry {
    ids: BTreeSet<ExternalId>,
}

impl ExternalRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the reference registry covering every identity the standard
    /// builder may emit.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for id in [
            constants::EXT_REPO_ANCHOR,
            constants::EXT_REPO_DEFINITION,
            constants::EXT_CANDLEPIN_ANCHOR,
            constants::EXT_PULP_ANCHOR,
            constants::EXT_CLIENT_CERT_CLASS,
            constants::EXT_DB_SEED,
            constants::EXT_APACHE_CERT_CLASS,
            constants::EXT_CA_CERT_CLASS,
            constants::EXT_SERVICE_CLASS,
        ] {
            registry.declare(ExternalId::new(id));
        }
        registry
    }

    /// Declares an external identity.
    pub fn declare(&mut self, id: ExternalId) {
        let _ = self.ids.insert(id);
    }

    /// Returns true if the identity has been declared.
    #[must_use]
    pub fn contains(&self, id: &ExternalId) -> bool {
        self.ids.contains(id)
    }

    /// Number of declared identities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true if no identities are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
