//! Integration tests for orbitkit-wizard.
//!
//! These drive whole wizard sessions through the public API: count changes,
//! address edits, rejected and accepted submissions, back navigation, and
//! configuration persistence. Run with: cargo test --test integration_test

use alloy_signer_local::PrivateKeySigner;
use anyhow::Result;
use tempdir::TempDir;

use orbitkit_wizard::{
    ConfigFingerprint, DeploymentConfiguration, IdentityGenerator, ORBITCONF_FILENAME,
    PROVISION_VERSION_FILENAME, ProvisionVersion, StepKind, SubmitOutcome, WalletIdentity,
    WizardBuilder,
};

/// A checksummed address no generator in these tests will ever produce.
const EXTERNAL_ADDRESS: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";

/// Deterministic generator deriving real keypairs from a counter.
///
/// Unlike a purely synthetic stub, the generated private keys actually
/// control their addresses, so payloads built from these identities survive
/// the full validation path.
struct SeqGenerator(u8);

impl IdentityGenerator for SeqGenerator {
    fn generate(&mut self) -> WalletIdentity {
        self.0 += 1;
        let mut secret = [0u8; 32];
        secret[31] = self.0;

        let signer = PrivateKeySigner::from_slice(&secret).expect("nonzero scalar");
        WalletIdentity {
            address: signer.address().to_checksum(None),
            private_key: Some(format!("0x{}", hex::encode(secret))),
        }
    }
}

/// Initialize tracing for tests (idempotent).
fn init_test_tracing() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init()
        .ok();
}

#[test]
fn test_growing_the_set_preserves_existing_wallets() -> Result<()> {
    init_test_tracing();

    let mut wizard = WizardBuilder::new()
        .name("orbit-grow-test")
        .build_with_generator(SeqGenerator(0));

    let initial = wizard.validators_step().unwrap().wallets().to_vec();
    assert_eq!(initial.len(), 1);

    wizard.set_validator_count(3);
    let grown = wizard.validators_step().unwrap().wallets().to_vec();

    assert_eq!(grown.len(), 3);
    assert_eq!(grown[0], initial[0], "existing wallet must be untouched");
    assert!(grown[1].has_key() && grown[2].has_key());
    Ok(())
}

#[test]
fn test_edited_slot_commits_without_its_generated_key() -> Result<()> {
    init_test_tracing();

    let mut wizard = WizardBuilder::new()
        .name("orbit-edit-test")
        .build_with_generator(SeqGenerator(0));

    wizard.set_validator_count(3);
    let wallets = wizard.validators_step().unwrap().wallets().to_vec();

    // Replace the middle slot with an externally supplied address.
    let mut form = wizard.validators_step().unwrap().default_form();
    form.addresses[1] = EXTERNAL_ADDRESS.to_string();

    let outcome = wizard.submit_validators(&form)?;
    assert!(outcome.is_committed());

    let committed = wizard.configuration().validators.clone().unwrap();
    assert_eq!(committed.len(), 3);
    assert_eq!(committed[0], wallets[0]);
    assert_eq!(committed[2], wallets[2]);
    assert_eq!(committed[1].address, EXTERNAL_ADDRESS);
    assert!(
        !committed[1].has_key(),
        "a substituted address must never inherit a generated key"
    );
    Ok(())
}

#[test]
fn test_batch_poster_submits_displayed_identity_verbatim() -> Result<()> {
    init_test_tracing();

    let mut wizard = WizardBuilder::new()
        .name("orbit-poster-test")
        .build_with_generator(SeqGenerator(0));

    let form = wizard.validators_step().unwrap().default_form();
    wizard.submit_validators(&form)?;
    assert_eq!(wizard.current_step(), Some(StepKind::BatchPoster));

    let displayed = wizard.batch_poster_step().unwrap().identity().clone();
    let form = wizard.batch_poster_step().unwrap().default_form();
    let outcome = wizard.submit_batch_poster(&form)?;
    assert!(outcome.is_committed());
    assert!(wizard.is_complete());

    let committed = wizard.configuration().batch_poster.clone().unwrap();
    assert_eq!(committed, displayed);
    Ok(())
}

#[test]
fn test_restored_batch_poster_survives_a_new_session() -> Result<()> {
    init_test_tracing();

    // First session commits everything.
    let mut wizard = WizardBuilder::new()
        .name("orbit-restore-test")
        .build_with_generator(SeqGenerator(0));
    let form = wizard.validators_step().unwrap().default_form();
    wizard.submit_validators(&form)?;
    let form = wizard.batch_poster_step().unwrap().default_form();
    wizard.submit_batch_poster(&form)?;

    let saved = wizard.configuration().clone();
    let saved_poster = saved.batch_poster.clone().unwrap();

    // A new session restored from the saved configuration shows the same
    // batch poster, key included, instead of generating a fresh one.
    let mut wizard = WizardBuilder::new()
        .name("orbit-restore-test-2")
        .restore(saved)
        .build_with_generator(SeqGenerator(100));

    let form = wizard.validators_step().unwrap().default_form();
    wizard.submit_validators(&form)?;

    let displayed = wizard.batch_poster_step().unwrap().identity().clone();
    assert_eq!(displayed, saved_poster);
    Ok(())
}

#[test]
fn test_rejected_submission_blocks_the_advance() -> Result<()> {
    init_test_tracing();

    let mut wizard = WizardBuilder::new()
        .name("orbit-reject-test")
        .build_with_generator(SeqGenerator(0));

    let mut form = wizard.validators_step().unwrap().default_form();
    form.addresses[0] = EXTERNAL_ADDRESS.to_lowercase(); // checksum broken

    let outcome = wizard.submit_validators(&form)?;
    let SubmitOutcome::Rejected(errors) = outcome else {
        anyhow::bail!("submission should have been rejected");
    };

    assert!(errors.get("addresses.0").is_some());
    assert_eq!(wizard.current_step(), Some(StepKind::Validators));
    assert!(wizard.configuration().validators.is_none());

    // The step recovers: a clean resubmission goes through.
    let form = wizard.validators_step().unwrap().default_form();
    assert!(wizard.submit_validators(&form)?.is_committed());
    Ok(())
}

#[test]
fn test_back_navigation_reseeds_from_the_commit() -> Result<()> {
    init_test_tracing();

    let mut wizard = WizardBuilder::new()
        .name("orbit-back-test")
        .build_with_generator(SeqGenerator(0));

    wizard.set_validator_count(4);
    let form = wizard.validators_step().unwrap().default_form();
    wizard.submit_validators(&form)?;
    let committed = wizard.configuration().validators.clone().unwrap();

    wizard.back();
    assert_eq!(wizard.current_step(), Some(StepKind::Validators));

    let step = wizard.validators_step().unwrap();
    assert_eq!(step.count(), 4);
    assert_eq!(step.wallets(), &committed[..]);

    // Resubmitting with a smaller count overwrites the earlier commit.
    wizard.set_validator_count(2);
    let form = wizard.validators_step().unwrap().default_form();
    wizard.submit_validators(&form)?;

    assert_eq!(wizard.configuration().validators.as_ref().unwrap().len(), 2);
    Ok(())
}

#[test]
fn test_completed_session_persists_and_reloads() -> Result<()> {
    init_test_tracing();

    let temp_dir = TempDir::new("orbitkit-flow")?;

    let mut wizard = WizardBuilder::new()
        .name("orbit-persist-test")
        .build_with_generator(SeqGenerator(0));

    wizard.set_validator_count(2);
    let mut form = wizard.validators_step().unwrap().default_form();
    form.addresses[1] = EXTERNAL_ADDRESS.to_string();
    wizard.submit_validators(&form)?;
    let form = wizard.batch_poster_step().unwrap().default_form();
    wizard.submit_batch_poster(&form)?;

    let config = wizard.configuration().clone();
    assert!(config.is_complete());

    // Save the configuration and its version metadata.
    let config_path = temp_dir.path().join(ORBITCONF_FILENAME);
    config.save_to_file(&config_path)?;

    let hash = ConfigFingerprint::from_configuration(&config).compute_hash();
    let version_path = temp_dir.path().join(PROVISION_VERSION_FILENAME);
    ProvisionVersion::new(hash.clone()).save_to_file(&version_path)?;

    // Reload both and check they line up.
    let loaded = DeploymentConfiguration::load_from_file(&config_path)?;
    assert_eq!(loaded, config);

    let version = ProvisionVersion::load_from_file(&version_path)?;
    assert_eq!(
        version.config_hash,
        ConfigFingerprint::from_configuration(&loaded).compute_hash()
    );
    assert_eq!(version.config_hash, hash);
    Ok(())
}
