//! Identity-list reconciliation against a requested count.

use crate::identity::{IdentityGenerator, WalletIdentity};

/// Resize `current` to exactly `desired_count` entries.
///
/// Shrinking truncates from the tail and generates nothing; growing appends
/// freshly generated identities while leaving the existing prefix untouched,
/// addresses and keys included. Callers clamp `desired_count` to the
/// supported bounds before invoking.
pub fn reconcile<G: IdentityGenerator>(
    current: &[WalletIdentity],
    desired_count: usize,
    generator: &mut G,
) -> Vec<WalletIdentity> {
    if desired_count <= current.len() {
        return current[..desired_count].to_vec();
    }

    let missing = desired_count - current.len();
    tracing::debug!(
        have = current.len(),
        want = desired_count,
        "Generating identities for new validator slots"
    );

    let mut result = current.to_vec();
    result.extend(std::iter::repeat_with(|| generator.generate()).take(missing));
    result
}
