//! orbitkit is a CLI tool to provision rollup deployment credentials in a few clicks.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use comfy_table::Table;

use cli::Cli;
use orbitkit_wizard::{
    ConfigFingerprint, DeploymentConfiguration, ORBITCONF_FILENAME, PROVISION_VERSION_FILENAME,
    ProvisionVersion, SubmitOutcome, WalletIdentity, Wizard, WizardBuilder,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize the logger.
    tracing_subscriber::fmt()
        .with_max_level(cli.verbosity)
        .init();

    let mut builder = WizardBuilder::new();

    if let Some(session) = cli.session {
        builder = builder.name(session);
    }

    // Seed the session: either from a saved configuration file, or from a
    // batch poster carried over on the command line.
    if let Some(config_path) = &cli.config {
        let config = DeploymentConfiguration::load_from_file(config_path)?;
        builder = builder.restore(config);
    } else if let (Some(address), Some(key)) =
        (cli.batch_poster_address.clone(), cli.batch_poster_key.clone())
    {
        builder = builder.restore(DeploymentConfiguration {
            batch_poster: Some(WalletIdentity {
                address,
                private_key: Some(key),
            }),
            validators: None,
        });
    }

    let mut wizard = builder.build();

    run_validators_step(&mut wizard, &cli.validator_addresses, cli.validator_count)?;
    run_batch_poster_step(&mut wizard)?;

    let config = wizard.configuration().clone();
    print_summary(wizard.name(), &config);

    // Persist the configuration and its version metadata.
    std::fs::create_dir_all(&cli.outdata).context(format!(
        "Failed to create output directory {}",
        cli.outdata.display()
    ))?;

    let config_path = cli.outdata.join(ORBITCONF_FILENAME);
    config.save_to_file(&config_path)?;

    let hash = ConfigFingerprint::from_configuration(&config).compute_hash();
    ProvisionVersion::new(hash)
        .save_to_file(&cli.outdata.join(PROVISION_VERSION_FILENAME))?;

    tracing::info!(
        session = %wizard.name(),
        config_path = %config_path.display(),
        "Provisioning complete"
    );

    Ok(())
}

/// Drive the validators step: size the set, apply address overrides, submit.
fn run_validators_step(
    wizard: &mut Wizard,
    overrides: &[cli::AddressOverride],
    validator_count: Option<usize>,
) -> Result<()> {
    if let Some(count) = validator_count {
        wizard.set_validator_count(count);
    }

    let step = wizard
        .validators_step()
        .context("wizard is not on the validators step")?;
    let mut form = step.default_form();

    for replacement in overrides {
        let slot = form
            .addresses
            .get_mut(replacement.index)
            .context(format!(
                "validator slot {} does not exist (count is {})",
                replacement.index,
                form.number_of_validators
            ))?;
        *slot = replacement.address.clone();
    }

    match wizard.submit_validators(&form)? {
        SubmitOutcome::Committed { .. } => Ok(()),
        SubmitOutcome::Rejected(errors) => {
            for (field, message) in errors.iter() {
                tracing::error!(field, message, "Invalid validator configuration");
            }
            anyhow::bail!("validator configuration rejected: {}", errors)
        }
    }
}

/// Drive the batch-poster step: submit the displayed identity as-is.
fn run_batch_poster_step(wizard: &mut Wizard) -> Result<()> {
    let step = wizard
        .batch_poster_step()
        .context("wizard is not on the batch-poster step")?;
    let form = step.default_form();

    match wizard.submit_batch_poster(&form)? {
        SubmitOutcome::Committed { .. } => Ok(()),
        SubmitOutcome::Rejected(errors) => {
            for (field, message) in errors.iter() {
                tracing::error!(field, message, "Invalid batch poster configuration");
            }
            anyhow::bail!("batch poster configuration rejected: {}", errors)
        }
    }
}

/// Print a summary of the provisioned roles.
///
/// Private keys are never printed; the table only shows whether a slot's key
/// is held in the configuration.
fn print_summary(session: &str, config: &DeploymentConfiguration) {
    let mut table = Table::new();
    table.set_header(vec!["Role", "Address", "Key"]);

    if let Some(poster) = &config.batch_poster {
        table.add_row(vec![
            "batch-poster".to_string(),
            poster.address.clone(),
            key_label(poster).to_string(),
        ]);
    }

    if let Some(validators) = &config.validators {
        for (index, wallet) in validators.iter().enumerate() {
            let role = if index == 0 {
                format!("validator-{} (reserved)", index)
            } else {
                format!("validator-{}", index)
            };
            table.add_row(vec![role, wallet.address.clone(), key_label(wallet).to_string()]);
        }
    }

    println!("Session: {}", session);
    println!("{table}");
}

fn key_label(wallet: &WalletIdentity) -> &'static str {
    if wallet.has_key() { "held" } else { "external" }
}
