//! Required selection checks run before a survey is submitted.
//!
//! Two choosers live next to the widget in the same form: the project the
//! survey is about and the grade given. Either may be absent from the page;
//! a present chooser still holding the "unselected" value blocks submission.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A required chooser consulted before submission, in check order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationTarget {
    Project,
    Grade,
}

impl ValidationTarget {
    pub const ALL: [ValidationTarget; 2] = [ValidationTarget::Project, ValidationTarget::Grade];
}

/// The first required chooser found unselected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFailure {
    pub target: ValidationTarget,
}

impl ValidationFailure {
    /// Alert text shown to the user.
    pub fn message(&self) -> &'static str {
        match self.target {
            ValidationTarget::Project => "Please Choose a Project",
            ValidationTarget::Grade => "Please Choose a Grade",
        }
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Checks the choosers in order and reports only the first failure.
///
/// `value_of` returns the current value of a chooser, or `None` when the page
/// does not contain it. Missing choosers never block.
pub fn check_required_selections<F>(unselected: &str, mut value_of: F) -> Result<(), ValidationFailure>
where
    F: FnMut(ValidationTarget) -> Option<String>,
{
    for target in ValidationTarget::ALL {
        if value_of(target).as_deref() == Some(unselected) {
            return Err(ValidationFailure { target });
        }
    }
    Ok(())
}
