//! Identifiers and constants the controller needs to find its way around the
//! survey page.
//!
//! The defaults reproduce the markup the survey views render today, so a page
//! that ships no configuration behaves exactly like the legacy script. A page
//! can override any subset of keys with a JSON object, either passed to the
//! mount entry point or stored in the widget's `data-survey-config` attribute.

use serde::{Deserialize, Serialize};

use crate::error::SurveyError;

/// Attribute on the widget root that may carry a JSON `SurveyConfig`.
pub const CONFIG_ATTRIBUTE: &str = "data-survey-config";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurveyConfig {
    /// `id` of the survey container (`div#survey_widget`).
    pub widget_id: String,

    /// Class on the container that marks a blank survey being taken for the
    /// first time.
    pub create_marker_class: String,

    /// `id` of the editing-only options panel that must never reach the
    /// snapshot.
    pub options_panel_id: String,

    /// `id` of the hidden input receiving the snapshot.
    pub snapshot_field_id: String,

    /// `id` of the required project chooser.
    pub project_select_id: String,

    /// `id` of the required grade chooser.
    pub grade_select_id: String,

    /// Value a chooser holds while nothing has been picked.
    pub unselected_value: String,

    /// Class of a multiple choice group.
    pub multi_pick_class: String,

    /// Tag and class of the table cell that hosts the widget.
    pub layout_cell_tag: String,
    pub layout_cell_class: String,

    /// Width in pixels forced on the hosting cell.
    pub layout_cell_width_px: u32,

    /// Attribute written on every control that already received its
    /// behaviors.
    pub augmented_attribute: String,

    /// Line height used by the in-memory page to simulate layout.
    pub line_height_px: u32,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            widget_id: "survey_widget".to_string(),
            create_marker_class: "create".to_string(),
            options_panel_id: "survey_options".to_string(),
            snapshot_field_id: "id_s_html".to_string(),
            project_select_id: "id_project".to_string(),
            grade_select_id: "id_grade".to_string(),
            unselected_value: "None".to_string(),
            multi_pick_class: "pick_multi".to_string(),
            layout_cell_tag: "td".to_string(),
            layout_cell_class: "formfieldvalue".to_string(),
            layout_cell_width_px: 200,
            augmented_attribute: "data-survey-augmented".to_string(),
            line_height_px: 16,
        }
    }
}

impl SurveyConfig {
    /// Parses a (possibly partial) JSON configuration. Missing keys keep
    /// their defaults.
    pub fn from_json(json: &str) -> Result<Self, SurveyError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolves the effective configuration: an explicit JSON argument wins
    /// over the attribute found on the widget, which wins over the defaults.
    pub fn resolve(explicit: Option<&str>, from_attribute: Option<&str>) -> Result<Self, SurveyError> {
        match explicit.or(from_attribute).map(str::trim) {
            Some(json) if !json.is_empty() => Self::from_json(json),
            _ => Ok(Self::default()),
        }
    }
}
