//! Wizard orchestration: step sequencing, shared context, navigation.

use anyhow::Result;

use crate::context::{DeploymentConfiguration, DeploymentContextStore};
use crate::identity::{IdentityGenerator, RandomIdentityGenerator};
use crate::schema::{BatchPosterForm, FieldErrors, ValidatorsForm};
use crate::steps::{BatchPosterStep, ValidatorsStep};

/// The wizard's step sequence, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum StepKind {
    Validators,
    BatchPoster,
}

/// Outcome of a step submission.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Payload committed; the wizard advanced to `next` (None when the last
    /// step has committed).
    Committed { next: Option<StepKind> },
    /// Validation failed; the step stays editable with these errors and the
    /// shared context is untouched.
    Rejected(FieldErrors),
}

impl SubmitOutcome {
    /// Returns true when the submission committed.
    pub fn is_committed(&self) -> bool {
        matches!(self, SubmitOutcome::Committed { .. })
    }
}

/// The controller for the step the wizard is currently showing.
#[derive(Debug)]
enum ActiveStep {
    Validators(ValidatorsStep),
    BatchPoster(BatchPosterStep),
    /// Every step has committed.
    Done,
}

/// A provisioning wizard session.
///
/// Owns the shared context store, the identity generator, and the controller
/// for whichever step is active. Only one step is ever active at a time, so
/// all commits into the store are serialized by construction.
#[derive(Debug)]
pub struct Wizard<G = RandomIdentityGenerator> {
    name: String,
    store: DeploymentContextStore,
    generator: G,
    active: ActiveStep,
}

impl<G: IdentityGenerator> Wizard<G> {
    /// The session name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The configuration committed so far.
    pub fn configuration(&self) -> &DeploymentConfiguration {
        self.store.state()
    }

    /// The step the wizard is currently showing, or None when finished.
    pub fn current_step(&self) -> Option<StepKind> {
        match self.active {
            ActiveStep::Validators(_) => Some(StepKind::Validators),
            ActiveStep::BatchPoster(_) => Some(StepKind::BatchPoster),
            ActiveStep::Done => None,
        }
    }

    /// Returns true once every step has committed.
    pub fn is_complete(&self) -> bool {
        matches!(self.active, ActiveStep::Done)
    }

    /// The active validators step, if the wizard is on it.
    pub fn validators_step(&self) -> Option<&ValidatorsStep> {
        match &self.active {
            ActiveStep::Validators(step) => Some(step),
            _ => None,
        }
    }

    /// The active batch-poster step, if the wizard is on it.
    pub fn batch_poster_step(&self) -> Option<&BatchPosterStep> {
        match &self.active {
            ActiveStep::BatchPoster(step) => Some(step),
            _ => None,
        }
    }

    /// Set the requested validator count on the active validators step.
    ///
    /// No-op when the wizard is on another step.
    pub fn set_validator_count(&mut self, requested: usize) {
        if let ActiveStep::Validators(step) = &mut self.active {
            step.set_count(requested, &mut self.generator);
        }
    }

    /// Submit the validators step and advance on success.
    pub fn submit_validators(&mut self, form: &ValidatorsForm) -> Result<SubmitOutcome> {
        let ActiveStep::Validators(step) = &mut self.active else {
            anyhow::bail!("wizard is not on the validators step");
        };

        match step.submit(form, &mut self.store) {
            Ok(()) => {
                self.enter_step(StepKind::BatchPoster);
                Ok(SubmitOutcome::Committed {
                    next: Some(StepKind::BatchPoster),
                })
            }
            Err(errors) => Ok(SubmitOutcome::Rejected(errors)),
        }
    }

    /// Submit the batch-poster step and finish the wizard on success.
    pub fn submit_batch_poster(&mut self, form: &BatchPosterForm) -> Result<SubmitOutcome> {
        let ActiveStep::BatchPoster(step) = &mut self.active else {
            anyhow::bail!("wizard is not on the batch-poster step");
        };

        match step.submit(form, &mut self.store) {
            Ok(()) => {
                tracing::info!(session = %self.name, "All wizard steps committed");
                self.active = ActiveStep::Done;
                Ok(SubmitOutcome::Committed { next: None })
            }
            Err(errors) => Ok(SubmitOutcome::Rejected(errors)),
        }
    }

    /// Navigate back one step.
    ///
    /// The re-entered step starts editing again, seeded from whatever was
    /// last committed; the abandoned step's local state is dropped without
    /// side effects. No-op on the first step.
    pub fn back(&mut self) {
        let target = match self.current_step() {
            Some(StepKind::Validators) => return,
            Some(StepKind::BatchPoster) => StepKind::Validators,
            None => StepKind::BatchPoster,
        };
        tracing::debug!(step = %target, "Re-entering previous step");
        self.enter_step(target);
    }

    /// Reset the session: drop all committed state and start over on the
    /// first step.
    pub fn reset(&mut self) {
        tracing::info!(session = %self.name, "Resetting wizard session");
        self.store.reset();
        self.enter_step(StepKind::Validators);
    }

    fn enter_step(&mut self, kind: StepKind) {
        self.active = match kind {
            StepKind::Validators => {
                ActiveStep::Validators(ValidatorsStep::enter(&self.store, &mut self.generator))
            }
            StepKind::BatchPoster => {
                ActiveStep::BatchPoster(BatchPosterStep::enter(&self.store, &mut self.generator))
            }
        };
    }
}

/// Builder for a wizard session.
///
/// Handles session name generation and seeding the context from a previously
/// saved configuration.
#[derive(Debug, Clone, Default)]
pub struct WizardBuilder {
    name: Option<String>,
    restore: Option<DeploymentConfiguration>,
}

impl WizardBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the session name.
    ///
    /// If not set, a memorable two-word name will be generated
    /// (e.g., "orbit-happy-turtle").
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Seed the session from a previously committed configuration.
    ///
    /// Steps entered afterwards restore their fields from it, exactly as if
    /// the user had navigated back after committing.
    pub fn restore(mut self, config: DeploymentConfiguration) -> Self {
        self.restore = Some(config);
        self
    }

    /// Build the session with the default random generator.
    pub fn build(self) -> Wizard<RandomIdentityGenerator> {
        self.build_with_generator(RandomIdentityGenerator)
    }

    /// Build the session with a caller-supplied identity generator.
    pub fn build_with_generator<G: IdentityGenerator>(self, mut generator: G) -> Wizard<G> {
        let name = self.name.unwrap_or_else(|| {
            let name = names::Generator::default()
                .next()
                .unwrap_or_else(|| "unknown-session".to_string());
            format!("orbit-{}", name)
        });

        let store = match self.restore {
            Some(config) => DeploymentContextStore::with_state(config),
            None => DeploymentContextStore::new(),
        };

        tracing::info!(session = %name, "Starting provisioning wizard");

        let active = ActiveStep::Validators(ValidatorsStep::enter(&store, &mut generator));
        Wizard {
            name,
            store,
            generator,
            active,
        }
    }
}
