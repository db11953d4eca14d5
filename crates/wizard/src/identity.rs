//! Wallet identity entities and the identity generator seam.

use alloy_signer_local::PrivateKeySigner;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Minimum number of validators in a set.
pub const MIN_VALIDATORS: usize = 1;
/// Maximum number of validators in a set.
pub const MAX_VALIDATORS: usize = 16;

/// A wallet identity: a checksummed account address plus an optional private key.
///
/// The private key is present only when the identity was generated by the
/// wizard or explicitly carried forward from a prior commit. Identities built
/// from an externally supplied address never carry a key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletIdentity {
    /// EIP-55 checksummed account address.
    pub address: String,
    /// Hex-encoded private key matching `address`, if held.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
}

impl WalletIdentity {
    /// Create an identity from an externally supplied address, with no key.
    pub fn external(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            private_key: None,
        }
    }

    /// Returns true if this identity holds a private key.
    pub fn has_key(&self) -> bool {
        self.private_key.is_some()
    }
}

/// Ordered set of validator identities.
///
/// The entry at index 0 backs the reserved role and is rendered read-only at
/// the presentation boundary; the core treats all indices uniformly.
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_more::Deref,
    derive_more::From,
)]
pub struct ValidatorSet(Vec<WalletIdentity>);

impl ValidatorSet {
    /// Addresses of all validators, in order.
    pub fn addresses(&self) -> Vec<String> {
        self.0.iter().map(|wallet| wallet.address.clone()).collect()
    }
}

/// Source of freshly generated wallet identities.
///
/// Key derivation is an opaque collaborator for the wizard: anything that can
/// mint a syntactically valid address with a matching private key satisfies
/// this seam.
pub trait IdentityGenerator {
    /// Produce a fresh identity holding a matching private key.
    fn generate(&mut self) -> WalletIdentity;
}

/// Generator producing random secp256k1 keypairs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdentityGenerator;

impl IdentityGenerator for RandomIdentityGenerator {
    fn generate(&mut self) -> WalletIdentity {
        let mut rng = rand::rng();
        // Rejection-sample until the bytes form a valid secp256k1 scalar.
        let (secret, signer) = loop {
            let secret: [u8; 32] = rng.random();
            if let Ok(signer) = PrivateKeySigner::from_slice(&secret) {
                break (secret, signer);
            }
        };

        WalletIdentity {
            address: signer.address().to_checksum(None),
            private_key: Some(format!("0x{}", hex::encode(secret))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_core::primitives::Address;

    #[test]
    fn test_generated_identity_is_checksummed() {
        let wallet = RandomIdentityGenerator.generate();
        assert!(Address::parse_checksummed(&wallet.address, None).is_ok());
    }

    #[test]
    fn test_generated_identity_holds_matching_key() {
        let wallet = RandomIdentityGenerator.generate();
        let key = wallet.private_key.expect("generated identity must hold a key");

        let signer: PrivateKeySigner = key.parse().expect("generated key must parse");
        assert_eq!(signer.address().to_checksum(None), wallet.address);
    }

    #[test]
    fn test_generated_identities_are_distinct() {
        let mut generator = RandomIdentityGenerator;
        let first = generator.generate();
        let second = generator.generate();
        assert_ne!(first.address, second.address);
    }

    #[test]
    fn test_external_identity_has_no_key() {
        let wallet = WalletIdentity::external("0x70997970C51812dc3A010C7d01b50e0d17dc79C8");
        assert!(!wallet.has_key());
        assert_eq!(wallet.address, "0x70997970C51812dc3A010C7d01b50e0d17dc79C8");
    }
}
