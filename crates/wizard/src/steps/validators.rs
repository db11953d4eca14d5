//! Validators step: count-driven reconciliation and secret-preserving submit.

use crate::context::{ContextAction, DeploymentContextStore};
use crate::identity::{IdentityGenerator, MAX_VALIDATORS, MIN_VALIDATORS, WalletIdentity};
use crate::reconcile::reconcile;
use crate::resolve::resolve_secrets;
use crate::schema::{self, FieldErrors, ValidatorsForm};

use super::StepPhase;

/// Controller for the validators step.
///
/// Holds the step-local identity list, keeps it sized to the requested count,
/// and on submit resolves which generated secrets survive the user's address
/// edits before committing the payload.
#[derive(Debug)]
pub struct ValidatorsStep {
    wallets: Vec<WalletIdentity>,
    count: usize,
    phase: StepPhase,
    errors: FieldErrors,
}

impl ValidatorsStep {
    /// Enter the step.
    ///
    /// Seeds from the committed validator set when one exists (back
    /// navigation), otherwise generates a default set of the minimum size.
    pub fn enter<G: IdentityGenerator>(
        store: &DeploymentContextStore,
        generator: &mut G,
    ) -> Self {
        let (count, wallets) = match store.state().validators.as_ref() {
            Some(validators) => (validators.len(), validators.to_vec()),
            None => (
                MIN_VALIDATORS,
                reconcile(&[], MIN_VALIDATORS, generator),
            ),
        };

        Self {
            wallets,
            count,
            phase: StepPhase::Editing,
            errors: FieldErrors::default(),
        }
    }

    /// Set the requested validator count, clamped to the supported bounds.
    ///
    /// The local list is reconciled synchronously: the state the presentation
    /// reads after this call is already resized.
    pub fn set_count<G: IdentityGenerator>(&mut self, requested: usize, generator: &mut G) {
        let clamped = requested.clamp(MIN_VALIDATORS, MAX_VALIDATORS);
        if clamped != requested {
            tracing::debug!(requested, clamped, "Validator count out of range, clamping");
        }

        self.count = clamped;
        self.wallets = reconcile(&self.wallets, clamped, generator);
    }

    /// The step-local identity list.
    pub fn wallets(&self) -> &[WalletIdentity] {
        &self.wallets
    }

    /// The currently requested validator count.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn phase(&self) -> StepPhase {
        self.phase
    }

    /// Field errors from the last rejected submission.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Form values backing the inputs when the step is rendered.
    pub fn default_form(&self) -> ValidatorsForm {
        ValidatorsForm {
            number_of_validators: self.count,
            addresses: self.wallets.iter().map(|wallet| wallet.address.clone()).collect(),
        }
    }

    /// Submit the step's form values.
    ///
    /// On success the resolved payload is committed to the shared context and
    /// the step becomes terminal. On failure the field errors are retained,
    /// the step stays editable, and the store is never touched.
    pub fn submit(
        &mut self,
        form: &ValidatorsForm,
        store: &mut DeploymentContextStore,
    ) -> Result<(), FieldErrors> {
        self.phase = StepPhase::Validating;

        let errors = schema::validate_validators(form);
        if !errors.is_empty() {
            tracing::debug!(%errors, "Validator submission rejected");
            self.phase = StepPhase::Editing;
            self.errors = errors.clone();
            return Err(errors);
        }

        self.errors = FieldErrors::default();
        let payload = resolve_secrets(&self.wallets, &form.addresses);
        store.dispatch(ContextAction::SetValidators(payload.into()));
        self.phase = StepPhase::Committed;
        Ok(())
    }
}
