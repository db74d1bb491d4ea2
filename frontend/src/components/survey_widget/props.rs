//! Properties of the `SurveyWidget` component.

use survey_common::model::mode::SurveyMode;
use survey_common::SurveyConfig;
use yew::prelude::*;

/// Properties for the `SurveyWidget`.
#[derive(Properties, PartialEq, Clone)]
pub struct SurveyWidgetProps {
    /// Server rendered markup of the widget, including the enclosing form.
    ///
    /// It is inserted as is. The controller looks up the widget, the choosers
    /// and the hidden snapshot field inside it by id.
    pub markup: AttrValue,

    /// Mode to mount in. When `None` (the default) the widget's marker class
    /// decides.
    #[prop_or_default]
    pub mode: Option<SurveyMode>,

    /// DOM identifiers and constants. Read once, on the first render.
    #[prop_or_default]
    pub config: SurveyConfig,
}
