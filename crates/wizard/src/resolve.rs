//! Secret resolution for user-submitted address lists.

use crate::identity::WalletIdentity;

/// Build the final identity payload from submitted addresses.
///
/// A private key survives only when the submitted address is byte-identical
/// to a known identity's address: the key follows the address on reorder and
/// is dropped for any address the wizard did not generate. This keeps a key
/// from ever being attached to an address it does not control.
pub fn resolve_secrets(known: &[WalletIdentity], submitted: &[String]) -> Vec<WalletIdentity> {
    submitted
        .iter()
        .map(|address| {
            let held = known.iter().find(|wallet| wallet.address == *address);
            WalletIdentity {
                address: address.clone(),
                private_key: held.and_then(|wallet| wallet.private_key.clone()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR_A: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
    const ADDR_B: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";
    const ADDR_C: &str = "0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC";

    fn held(address: &str, key: &str) -> WalletIdentity {
        WalletIdentity {
            address: address.to_string(),
            private_key: Some(key.to_string()),
        }
    }

    #[test]
    fn test_untouched_addresses_keep_their_keys() {
        let known = vec![held(ADDR_A, "0xk1"), held(ADDR_B, "0xk2")];
        let submitted = vec![ADDR_A.to_string(), ADDR_B.to_string()];

        assert_eq!(resolve_secrets(&known, &submitted), known);
    }

    #[test]
    fn test_replaced_address_drops_the_key() {
        let known = vec![held(ADDR_A, "0xk1")];
        let submitted = vec![ADDR_C.to_string()];

        let result = resolve_secrets(&known, &submitted);
        assert_eq!(result, vec![WalletIdentity::external(ADDR_C)]);
    }

    #[test]
    fn test_key_follows_address_on_reorder() {
        let known = vec![held(ADDR_A, "0xk1"), held(ADDR_B, "0xk2")];
        let submitted = vec![ADDR_B.to_string(), ADDR_A.to_string()];

        let result = resolve_secrets(&known, &submitted);
        assert_eq!(result, vec![held(ADDR_B, "0xk2"), held(ADDR_A, "0xk1")]);
    }

    #[test]
    fn test_output_length_tracks_submission_not_known_set() {
        let known = vec![held(ADDR_A, "0xk1"), held(ADDR_B, "0xk2")];
        let submitted = vec![ADDR_A.to_string()];

        assert_eq!(resolve_secrets(&known, &submitted).len(), 1);
    }

    #[test]
    fn test_match_is_case_exact() {
        // A lowercased copy of a held address is a different byte string and
        // must not inherit the key.
        let known = vec![held(ADDR_A, "0xk1")];
        let submitted = vec![ADDR_A.to_lowercase()];

        let result = resolve_secrets(&known, &submitted);
        assert!(result[0].private_key.is_none());
    }
}
