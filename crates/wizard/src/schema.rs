//! Validation boundary converting raw form fields into typed entities.
//!
//! Nothing past this module accepts unvalidated input: the step controllers
//! run their forms through these checks before any payload is built.

use std::collections::BTreeMap;
use std::fmt;

use alloy_core::primitives::Address;
use alloy_signer_local::PrivateKeySigner;

use crate::identity::{MAX_VALIDATORS, MIN_VALIDATORS};

/// Field-keyed validation errors, surfaced next to the offending inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    /// Record an error for a field path (for example `addresses.3`).
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    /// Returns true when no field failed validation.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The error message recorded for a field, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// All recorded errors, ordered by field path.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(field, message)| (field.as_str(), message.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

/// Raw batch-poster form fields, as received from the presentation boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchPosterForm {
    pub batch_poster_address: String,
    pub batch_poster_private_key: String,
}

/// Raw validators form fields, as received from the presentation boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorsForm {
    pub number_of_validators: usize,
    pub addresses: Vec<String>,
}

/// Check an address for canonical EIP-55 checksummed form.
pub fn validate_address(address: &str) -> Result<(), String> {
    Address::parse_checksummed(address, None)
        .map(|_| ())
        .map_err(|_| format!("not a checksummed account address: '{}'", address))
}

/// Check a private key for 32-byte hex form. The `0x` prefix is optional.
pub fn validate_private_key(key: &str) -> Result<(), String> {
    let digits = key.strip_prefix("0x").unwrap_or(key);
    if digits.len() != 64 || hex::decode(digits).is_err() {
        return Err("private key must be 32 hex-encoded bytes".to_string());
    }
    Ok(())
}

/// Validate the batch-poster form.
///
/// Beyond the per-field format checks, the key must actually control the
/// submitted address.
pub fn validate_batch_poster(form: &BatchPosterForm) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if let Err(message) = validate_address(&form.batch_poster_address) {
        errors.insert("batch_poster_address", message);
    }
    if let Err(message) = validate_private_key(&form.batch_poster_private_key) {
        errors.insert("batch_poster_private_key", message);
    }

    if errors.is_empty() {
        match form.batch_poster_private_key.parse::<PrivateKeySigner>() {
            Ok(signer) if signer.address().to_checksum(None) == form.batch_poster_address => {}
            _ => {
                errors.insert(
                    "batch_poster_private_key",
                    "private key does not control the batch poster address",
                );
            }
        }
    }

    errors
}

/// Validate the validators form: count bounds, per-address format, and
/// uniqueness within the set.
pub fn validate_validators(form: &ValidatorsForm) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if !(MIN_VALIDATORS..=MAX_VALIDATORS).contains(&form.number_of_validators) {
        errors.insert(
            "number_of_validators",
            format!(
                "validator count must be between {} and {}",
                MIN_VALIDATORS, MAX_VALIDATORS
            ),
        );
    }

    if form.addresses.len() != form.number_of_validators {
        errors.insert(
            "addresses",
            format!(
                "expected {} addresses, got {}",
                form.number_of_validators,
                form.addresses.len()
            ),
        );
    }

    for (index, address) in form.addresses.iter().enumerate() {
        if let Err(message) = validate_address(address) {
            errors.insert(format!("addresses.{}", index), message);
        } else if form.addresses[..index].contains(address) {
            errors.insert(format!("addresses.{}", index), "duplicate validator address");
        }
    }

    errors
}
