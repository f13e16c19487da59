//! Build errors for the transition builder.

use thiserror::Error;

/// Errors that can occur when building a transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("Transition source state not specified. Call .from(state)")]
    MissingSource,

    #[error("Transition target state not specified. Call .to(state)")]
    MissingTarget,
}
