//! Per page load state machine of a survey submission.
//!
//! ```text
//! Idle -> Validating -> Blocked -> Validating -> ...
//!                    \-> Capturing -> Submitted
//! ```
//!
//! `Blocked` waits for the user to retry; `Submitted` is terminal.

use serde::{Deserialize, Serialize};

use crate::error::SurveyError;
use crate::model::validation::ValidationFailure;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionPhase {
    Idle,
    Validating,
    Blocked,
    Capturing,
    Submitted,
}

/// Tracks where the current page load is in the submission flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionFlow {
    phase: SubmissionPhase,
    last_failure: Option<ValidationFailure>,
    attempts: u32,
}

impl Default for SubmissionFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionFlow {
    pub fn new() -> Self {
        Self {
            phase: SubmissionPhase::Idle,
            last_failure: None,
            attempts: 0,
        }
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    /// Failure reported by the most recent blocked attempt.
    pub fn last_failure(&self) -> Option<ValidationFailure> {
        self.last_failure
    }

    /// Number of submit clicks that reached validation.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// A submit click arrived.
    pub fn begin_validation(&mut self) -> Result<(), SurveyError> {
        self.transition(SubmissionPhase::Validating)?;
        self.attempts += 1;
        Ok(())
    }

    /// Validation failed; the user must correct the form and retry.
    pub fn block(&mut self, failure: ValidationFailure) -> Result<(), SurveyError> {
        self.transition(SubmissionPhase::Blocked)?;
        self.last_failure = Some(failure);
        Ok(())
    }

    /// Validation passed; the real submit is about to be raised.
    pub fn pass(&mut self) -> Result<(), SurveyError> {
        self.transition(SubmissionPhase::Capturing)?;
        self.last_failure = None;
        Ok(())
    }

    /// The snapshot was taken and the post proceeds.
    pub fn finish(&mut self) -> Result<(), SurveyError> {
        self.transition(SubmissionPhase::Submitted)
    }

    /// Whether the serializer may capture right now.
    pub fn is_capturing(&self) -> bool {
        self.phase == SubmissionPhase::Capturing
    }

    fn transition(&mut self, to: SubmissionPhase) -> Result<(), SurveyError> {
        use SubmissionPhase::*;

        let allowed = matches!(
            (self.phase, to),
            (Idle, Validating)
                | (Blocked, Validating)
                | (Validating, Blocked)
                | (Validating, Capturing)
                | (Capturing, Submitted)
        );
        if !allowed {
            return Err(SurveyError::InvalidTransition {
                from: self.phase,
                to,
            });
        }
        self.phase = to;
        Ok(())
    }
}
