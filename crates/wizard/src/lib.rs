//! orbitkit-wizard - Provisioning wizard core for rollup deployments.
//!
//! This crate provides the step-by-step configuration flow for collecting a
//! chain's operator credentials: a batch poster account and a validator set.
//! Step-local wallet lists are reconciled against the requested count,
//! generated secrets survive only for addresses the user left untouched, and
//! each step commits its validated payload into the shared deployment
//! configuration exactly once.

mod context;
mod fingerprint;
mod identity;
mod reconcile;
mod resolve;
pub mod schema;
pub mod steps;
mod wizard;

pub use context::{
    ContextAction, DeploymentConfiguration, DeploymentContextStore, ORBITCONF_FILENAME,
};
pub use fingerprint::{ConfigFingerprint, PROVISION_VERSION_FILENAME, ProvisionVersion};
pub use identity::{
    IdentityGenerator, MAX_VALIDATORS, MIN_VALIDATORS, RandomIdentityGenerator, ValidatorSet,
    WalletIdentity,
};
pub use reconcile::reconcile;
pub use resolve::resolve_secrets;
pub use schema::{BatchPosterForm, FieldErrors, ValidatorsForm};
pub use steps::{BatchPosterStep, StepPhase, ValidatorsStep};
pub use wizard::{StepKind, SubmitOutcome, Wizard, WizardBuilder};
