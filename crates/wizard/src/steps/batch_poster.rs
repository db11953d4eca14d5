//! Batch poster step: a single non-editable identity submitted verbatim.

use crate::context::{ContextAction, DeploymentContextStore};
use crate::identity::{IdentityGenerator, WalletIdentity};
use crate::schema::{self, BatchPosterForm, FieldErrors};

use super::StepPhase;

/// Controller for the batch-poster step.
///
/// The address field is not editable at the presentation boundary, so there
/// is nothing to reconcile: whatever identity was active when the step was
/// entered is submitted as-is, private key included.
#[derive(Debug)]
pub struct BatchPosterStep {
    identity: WalletIdentity,
    phase: StepPhase,
    errors: FieldErrors,
}

impl BatchPosterStep {
    /// Enter the step, restoring the committed identity or generating a
    /// fresh one.
    pub fn enter<G: IdentityGenerator>(
        store: &DeploymentContextStore,
        generator: &mut G,
    ) -> Self {
        let identity = store
            .state()
            .batch_poster
            .clone()
            .unwrap_or_else(|| generator.generate());

        Self {
            identity,
            phase: StepPhase::Editing,
            errors: FieldErrors::default(),
        }
    }

    /// The identity currently displayed by the step.
    pub fn identity(&self) -> &WalletIdentity {
        &self.identity
    }

    pub fn phase(&self) -> StepPhase {
        self.phase
    }

    /// Field errors from the last rejected submission.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Form values backing the step's (non-editable) inputs.
    pub fn default_form(&self) -> BatchPosterForm {
        BatchPosterForm {
            batch_poster_address: self.identity.address.clone(),
            batch_poster_private_key: self.identity.private_key.clone().unwrap_or_default(),
        }
    }

    /// Submit the step's form values.
    ///
    /// The displayed address and private key go through verbatim; validation
    /// still runs so a corrupted restore cannot reach the shared context.
    pub fn submit(
        &mut self,
        form: &BatchPosterForm,
        store: &mut DeploymentContextStore,
    ) -> Result<(), FieldErrors> {
        self.phase = StepPhase::Validating;

        let errors = schema::validate_batch_poster(form);
        if !errors.is_empty() {
            tracing::debug!(%errors, "Batch poster submission rejected");
            self.phase = StepPhase::Editing;
            self.errors = errors.clone();
            return Err(errors);
        }

        self.errors = FieldErrors::default();
        let payload = WalletIdentity {
            address: form.batch_poster_address.clone(),
            private_key: Some(form.batch_poster_private_key.clone()),
        };
        store.dispatch(ContextAction::SetBatchPoster(payload));
        self.phase = StepPhase::Committed;
        Ok(())
    }
}
