//! Deterministic fingerprinting of committed configurations.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;

use crate::context::DeploymentConfiguration;
use crate::identity::WalletIdentity;

/// The default name for the version metadata file written next to a saved
/// configuration.
pub const PROVISION_VERSION_FILENAME: &str = ".provision-version.json";

/// Provisioning-relevant view of a committed configuration.
///
/// Covers the role addresses and which slots hold a generated key. Key
/// material itself is never part of the fingerprint, so the resulting hash is
/// safe to write next to session artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFingerprint {
    /// Batch poster address, when that step has committed.
    pub batch_poster_address: Option<String>,
    /// Validator addresses in committed order.
    pub validator_addresses: Vec<String>,
    /// For each validator slot, whether the wizard holds its key.
    pub held_slots: Vec<bool>,
}

impl ConfigFingerprint {
    /// Extract the fingerprint view from a configuration.
    pub fn from_configuration(config: &DeploymentConfiguration) -> Self {
        let validators: &[WalletIdentity] = config
            .validators
            .as_ref()
            .map(|set| set.as_slice())
            .unwrap_or(&[]);
        Self {
            batch_poster_address: config
                .batch_poster
                .as_ref()
                .map(|identity| identity.address.clone()),
            validator_addresses: validators
                .iter()
                .map(|wallet| wallet.address.clone())
                .collect(),
            held_slots: validators.iter().map(|wallet| wallet.has_key()).collect(),
        }
    }

    /// Compute a SHA-256 hash of this fingerprint.
    ///
    /// The hash is deterministic: the same addresses and key-presence flags
    /// always produce the same hex digest, regardless of the key material
    /// behind them.
    pub fn compute_hash(&self) -> String {
        let json = serde_json::to_string(self)
            .expect("ConfigFingerprint serialization should never fail");

        let mut hasher = Sha256::new();
        hasher.update(json.as_bytes());
        let result = hasher.finalize();

        hex::encode(result)
    }
}

/// Version metadata stored alongside a saved configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionVersion {
    /// SHA-256 hash of the configuration fingerprint.
    pub config_hash: String,
    /// Unix timestamp when the configuration was provisioned.
    pub provisioned_at: u64,
    /// orbitkit version that provisioned it.
    pub orbitkit_version: String,
}

impl ProvisionVersion {
    /// Create version metadata for the given fingerprint hash.
    ///
    /// The timestamp is set to the current system time and the version from
    /// the CARGO_PKG_VERSION environment variable.
    pub fn new(config_hash: String) -> Self {
        Self {
            config_hash,
            provisioned_at: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .expect("System time should be after Unix epoch")
                .as_secs(),
            orbitkit_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Save this version metadata to a file as formatted JSON.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize provision version")?;

        std::fs::write(path, json).context(format!(
            "Failed to write provision version to {}",
            path.display()
        ))?;

        Ok(())
    }

    /// Load version metadata from a file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!("Provision version file does not exist: {}", path.display());
        }

        let content = std::fs::read_to_string(path).context(format!(
            "Failed to read provision version from {}",
            path.display()
        ))?;

        let version: Self =
            serde_json::from_str(&content).context("Failed to parse provision version JSON")?;

        Ok(version)
    }
}
