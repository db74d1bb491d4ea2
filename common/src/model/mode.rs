use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SurveyError;

/// Lifecycle mode of a survey widget.
///
/// Chosen once when the widget is mounted and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurveyMode {
    /// Blank survey awaiting first-time answers. Text controls hold
    /// placeholder defaults that clear on first interaction.
    Create,
    /// A previously submitted response, shown with its saved answers.
    ViewSavedResult,
}

impl SurveyMode {
    /// Infers the mode from the classes found on the widget root.
    ///
    /// Only the presence of `create_marker` selects `Create`; anything else,
    /// including no marker at all, falls back to `ViewSavedResult`.
    pub fn from_marker<'a>(classes: impl IntoIterator<Item = &'a str>, create_marker: &str) -> Self {
        if classes.into_iter().any(|class| class == create_marker) {
            SurveyMode::Create
        } else {
            SurveyMode::ViewSavedResult
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SurveyMode::Create => "create",
            SurveyMode::ViewSavedResult => "view_saved_result",
        }
    }
}

impl fmt::Display for SurveyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SurveyMode {
    type Err = SurveyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "create" => Ok(SurveyMode::Create),
            "view" | "view_saved_result" | "saved" => Ok(SurveyMode::ViewSavedResult),
            other => Err(SurveyError::InvalidMode(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_selects_create() {
        let mode = SurveyMode::from_marker("survey create".split_whitespace(), "create");
        assert_eq!(mode, SurveyMode::Create);
    }

    #[test]
    fn missing_marker_falls_back_to_saved_results() {
        assert_eq!(
            SurveyMode::from_marker(std::iter::empty(), "create"),
            SurveyMode::ViewSavedResult
        );
        // Substrings are not markers.
        assert_eq!(
            SurveyMode::from_marker(["created"], "create"),
            SurveyMode::ViewSavedResult
        );
    }

    #[test]
    fn parses_entry_point_values() {
        assert_eq!("Create".parse::<SurveyMode>().unwrap(), SurveyMode::Create);
        assert_eq!(" view ".parse::<SurveyMode>().unwrap(), SurveyMode::ViewSavedResult);
        assert_eq!("saved".parse::<SurveyMode>().unwrap(), SurveyMode::ViewSavedResult);
        assert!(matches!(
            "edit".parse::<SurveyMode>(),
            Err(SurveyError::InvalidMode(mode)) if mode == "edit"
        ));
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&SurveyMode::ViewSavedResult).unwrap();
        assert_eq!(json, "\"view_saved_result\"");
    }
}
