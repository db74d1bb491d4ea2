use thiserror::Error;

use crate::model::submission::SubmissionPhase;
use crate::model::validation::ValidationFailure;

/// Errors raised by the survey controller.
///
/// None of these are fatal to the page. `MissingRequiredSelection` is shown to
/// the user as an alert; every other variant is logged and the operation that
/// produced it degrades to a no-op.
#[derive(Error, Debug)]
pub enum SurveyError {
    #[error("{0}")]
    MissingRequiredSelection(ValidationFailure),

    #[error("DOM target not found: {0}")]
    MissingDomTarget(String),

    #[error("Unknown survey mode: {0}")]
    InvalidMode(String),

    #[error("Invalid survey configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    #[error("Invalid submission transition from {from:?} to {to:?}")]
    InvalidTransition {
        from: SubmissionPhase,
        to: SubmissionPhase,
    },
}

impl SurveyError {
    pub fn missing(target: impl Into<String>) -> Self {
        SurveyError::MissingDomTarget(target.into())
    }
}
