//! Keyring-backed secret store.
//!
//! Stores each credential bundle as a JSON blob in the OS keyring. When the
//! keyring is unavailable, every lookup reports the bundle as absent so
//! callers degrade to credential-less execution.

use super::SecretStore;
use crate::error::{QuerypipeError, Result};
use keyring::Entry;
use std::collections::HashMap;
use tracing::warn;

const SERVICE_NAME: &str = "querypipe";

/// Secret store backed by the OS keyring.
#[derive(Debug, Clone)]
pub struct KeyringSecretStore {
    keyring_available: bool,
}

impl Default for KeyringSecretStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyringSecretStore {
    /// Creates a new store, probing keyring availability.
    pub fn new() -> Self {
        Self {
            keyring_available: Self::probe_keyring(),
        }
    }

    /// Probes whether the OS keyring is available.
    fn probe_keyring() -> bool {
        let test_entry = match Entry::new(SERVICE_NAME, "__probe__") {
            Ok(e) => e,
            Err(_) => return false,
        };

        match test_entry.set_password("test") {
            Ok(()) => {
                let _ = test_entry.delete_credential();
                true
            }
            Err(_) => false,
        }
    }

    /// Returns whether the OS keyring is available.
    pub fn is_available(&self) -> bool {
        self.keyring_available
    }

    fn entry(&self, name: &str) -> Result<Entry> {
        Entry::new(SERVICE_NAME, name)
            .map_err(|e| QuerypipeError::io(format!("Failed to access keyring: {e}")))
    }
}

impl SecretStore for KeyringSecretStore {
    fn get(&self, name: &str) -> Result<HashMap<String, String>> {
        if !self.keyring_available {
            warn!("OS keyring unavailable; treating bundle '{name}' as absent");
            return Err(QuerypipeError::secret_not_found(name));
        }

        let entry = self.entry(name)?;
        let blob = match entry.get_password() {
            Ok(blob) => blob,
            Err(keyring::Error::NoEntry) => {
                return Err(QuerypipeError::secret_not_found(name));
            }
            Err(e) => {
                return Err(QuerypipeError::io(format!(
                    "Failed to retrieve secret: {e}"
                )));
            }
        };

        serde_json::from_str(&blob).map_err(|e| {
            QuerypipeError::malformed_record(format!("Corrupt secret bundle '{name}': {e}"))
        })
    }

    fn set(&self, name: &str, values: HashMap<String, String>) -> Result<()> {
        if !self.keyring_available {
            return Err(QuerypipeError::io(
                "OS keyring unavailable; cannot store secrets",
            ));
        }

        let blob = serde_json::to_string(&values)
            .map_err(|e| QuerypipeError::io(format!("Failed to encode secret bundle: {e}")))?;

        self.entry(name)?
            .set_password(&blob)
            .map_err(|e| QuerypipeError::io(format!("Failed to store secret: {e}")))
    }
}
