//! Shared deployment configuration and its dispatch-only store.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::identity::{ValidatorSet, WalletIdentity};

/// The default name for a saved configuration file.
pub const ORBITCONF_FILENAME: &str = "Orbitkit.toml";

/// Configuration accumulated across the wizard steps.
///
/// Created empty when a session starts. Each step's successful submit merges
/// exactly one field; a resubmitted step overwrites its own field and nothing
/// else. The configuration is never rolled back automatically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentConfiguration {
    /// Batch poster credentials, set by the batch-poster step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_poster: Option<WalletIdentity>,
    /// Validator set, set by the validators step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validators: Option<ValidatorSet>,
}

impl DeploymentConfiguration {
    /// Returns true when every step has committed its field.
    pub fn is_complete(&self) -> bool {
        self.batch_poster.is_some() && self.validators.is_some()
    }

    /// Save the configuration to a TOML file.
    pub fn save_to_file(&self, path: &PathBuf) -> Result<()> {
        let content =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;
        std::fs::write(path, content)
            .context(format!("Failed to write configuration to {}", path.display()))?;
        tracing::info!(path = %path.display(), "Configuration saved");
        Ok(())
    }

    /// Load a configuration from a TOML file.
    ///
    /// Accepts either a file path or a directory containing the default
    /// configuration filename.
    pub fn load_from_file(path: &PathBuf) -> Result<Self> {
        if !path.exists() {
            return Err(anyhow::anyhow!(
                "Configuration file or directory not found: {}",
                path.display()
            ));
        }

        let config_path = if path.is_dir() {
            path.join(ORBITCONF_FILENAME)
        } else {
            path.to_path_buf()
        };

        let content = std::fs::read_to_string(config_path)
            .context(format!("Failed to read configuration from {}", path.display()))?;
        let config: Self =
            toml::from_str(&content).context("Failed to parse configuration file as TOML")?;
        tracing::info!(path = %path.display(), "Configuration loaded");
        Ok(config)
    }
}

/// Typed commit action for the context store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ContextAction {
    SetBatchPoster(WalletIdentity),
    SetValidators(ValidatorSet),
}

/// Session-scoped store for the deployment configuration.
///
/// All mutation goes through [`DeploymentContextStore::dispatch`]. The store
/// itself rejects nothing: validation happens upstream in the step
/// controllers, and dispatch is only reached from a step's commit transition.
#[derive(Debug, Default)]
pub struct DeploymentContextStore {
    state: DeploymentConfiguration,
}

impl DeploymentContextStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with a previously saved configuration.
    pub fn with_state(state: DeploymentConfiguration) -> Self {
        Self { state }
    }

    /// The current configuration.
    pub fn state(&self) -> &DeploymentConfiguration {
        &self.state
    }

    /// Apply a commit action. Each action overwrites only its own field;
    /// last write wins on resubmission.
    pub fn dispatch(&mut self, action: ContextAction) {
        match action {
            ContextAction::SetBatchPoster(identity) => {
                tracing::debug!(address = %identity.address, "Committing batch poster");
                self.state.batch_poster = Some(identity);
            }
            ContextAction::SetValidators(validators) => {
                tracing::debug!(count = validators.len(), "Committing validator set");
                self.state.validators = Some(validators);
            }
        }
    }

    /// Drop all committed state, returning the store to its empty form.
    pub fn reset(&mut self) {
        self.state = DeploymentConfiguration::default();
    }
}
