use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use tracing::level_filters::LevelFilter;

/// A `<index>=<address>` override for a validator slot.
///
/// Slot 0 is reserved for the chain owner and cannot be overridden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressOverride {
    pub index: usize,
    pub address: String,
}

impl FromStr for AddressOverride {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (index, address) = s
            .split_once('=')
            .ok_or_else(|| format!("expected <index>=<address>, got '{}'", s))?;

        let index: usize = index
            .trim()
            .parse()
            .map_err(|_| format!("invalid slot index '{}'", index))?;
        if index == 0 {
            return Err("slot 0 is reserved for the chain owner".to_string());
        }

        Ok(Self {
            index,
            address: address.trim().to_string(),
        })
    }
}

#[derive(Parser)]
#[command(name = "orbitkit")]
#[command(
    author,
    version,
    about = "Provision rollup deployment credentials in a few clicks"
)]
pub struct Cli {
    /// The verbosity level.
    #[arg(short, long, env = "ORBITKIT_VERBOSITY", default_value_t = LevelFilter::INFO)]
    pub verbosity: LevelFilter,

    /// A custom name for the session. If not provided, the session will be
    /// named: orbit-<adjective>-<noun>.
    #[arg(short, long, visible_alias = "name", env = "ORBITKIT_SESSION")]
    pub session: Option<String>,

    /// The number of validators to provision.
    ///
    /// Values outside 1..=16 are clamped to the nearest bound. If not
    /// provided, the restored count is kept (or 1 for a fresh session).
    #[arg(long, alias = "validators", env = "ORBITKIT_VALIDATORS")]
    pub validator_count: Option<usize>,

    /// Replace a validator slot's generated address: `<index>=<address>`.
    ///
    /// The replaced slot loses its generated private key. May be repeated.
    #[arg(long = "validator-address", env = "ORBITKIT_VALIDATOR_ADDRESSES", value_delimiter = ',')]
    pub validator_addresses: Vec<AddressOverride>,

    /// Restore a previously provisioned batch poster address.
    #[arg(long, env = "ORBITKIT_BATCH_POSTER_ADDRESS", requires = "batch_poster_key")]
    pub batch_poster_address: Option<String>,

    /// Private key controlling the restored batch poster address.
    #[arg(long, env = "ORBITKIT_BATCH_POSTER_KEY", requires = "batch_poster_address")]
    pub batch_poster_key: Option<String>,

    /// The path to the output directory for the provisioned configuration.
    #[arg(long, alias = "outdata", env = "ORBITKIT_OUTDATA", default_value = ".")]
    pub outdata: PathBuf,

    /// Path to an existing Orbitkit.toml to reprovision from.
    ///
    /// When provided, the wizard starts seeded with the saved configuration
    /// instead of generating everything fresh.
    #[arg(long, alias = "conf", env = "ORBITKIT_CONFIG")]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_parses_index_and_address() {
        let parsed: AddressOverride = "2=0x70997970C51812dc3A010C7d01b50e0d17dc79C8"
            .parse()
            .unwrap();
        assert_eq!(parsed.index, 2);
        assert_eq!(parsed.address, "0x70997970C51812dc3A010C7d01b50e0d17dc79C8");
    }

    #[test]
    fn test_override_rejects_reserved_slot() {
        let result: Result<AddressOverride, _> = "0=0x70997970C51812dc3A010C7d01b50e0d17dc79C8".parse();
        assert!(result.is_err());
    }

    #[test]
    fn test_override_rejects_malformed_input() {
        assert!("no-equals-sign".parse::<AddressOverride>().is_err());
        assert!("x=0xabc".parse::<AddressOverride>().is_err());
    }
}
