//! Wizard step controllers.
//!
//! Each step owns its local editing state and commits into the shared context
//! exactly once, when its submission validates. Abandoning a step before
//! submit just drops the controller; nothing outside it is touched.

mod batch_poster;
mod validators;

pub use batch_poster::BatchPosterStep;
pub use validators::ValidatorsStep;

/// Lifecycle phase of a step instance.
///
/// A submission moves the step through `Validating`; a rejected submission
/// returns it to `Editing` with field errors retained, an accepted one leaves
/// it terminal in `Committed`. Re-entering a step builds a fresh instance
/// back in `Editing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum StepPhase {
    #[default]
    Editing,
    Validating,
    Committed,
}
