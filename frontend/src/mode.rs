use log::debug;
use survey_common::model::mode::SurveyMode;
use survey_common::SurveyConfig;

use crate::dom::SurveyElement;

/// Reads the mode marker class off the widget root.
pub fn select_mode<E: SurveyElement>(widget: &E, config: &SurveyConfig) -> SurveyMode {
    let classes = widget.classes();
    SurveyMode::from_marker(classes.iter().map(String::as_str), &config.create_marker_class)
}

/// The mode the renderer asked for, or the one the markup carries.
pub fn resolve_mode<E: SurveyElement>(
    explicit: Option<SurveyMode>,
    widget: &E,
    config: &SurveyConfig,
) -> SurveyMode {
    match explicit {
        Some(mode) => mode,
        None => {
            let mode = select_mode(widget, config);
            debug!("No explicit survey mode; marker selects {}", mode);
            mode
        }
    }
}
