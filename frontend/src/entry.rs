//! JavaScript entry point for server rendered pages.
//!
//! ```js
//! import init, { mount_survey } from "./survey_frontend.js";
//! await init();
//! mount_survey(document.getElementById("survey_widget"), null, null);
//! ```

use log::LevelFilter;
use survey_common::config::CONFIG_ATTRIBUTE;
use survey_common::model::mode::SurveyMode;
use survey_common::{SurveyConfig, SurveyError};
use wasm_bindgen::prelude::*;

use crate::controller::SurveyController;
use crate::dom::web::{WebDocument, WebElement};
use crate::dom::SurveyElement;
use crate::logging;

fn to_js(err: SurveyError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Mounts the survey controller on `root`.
///
/// `root` is either the widget itself or an element containing it. `mode`
/// accepts `"create"` or `"view_saved_result"`; without it the widget's
/// marker class decides. `config_json` overrides the `data-survey-config`
/// attribute of `root`. Returns the mount report as JSON.
#[wasm_bindgen]
pub fn mount_survey(
    root: web_sys::Element,
    mode: Option<String>,
    config_json: Option<String>,
) -> Result<String, JsValue> {
    // Errors on every mount after the first.
    let _ = logging::init(LevelFilter::Info);

    let root = WebElement::new(root);
    let config_attribute = root.attribute(CONFIG_ATTRIBUTE);
    let config = SurveyConfig::resolve(config_json.as_deref(), config_attribute.as_deref()).map_err(to_js)?;
    let mode = mode
        .as_deref()
        .map(str::parse::<SurveyMode>)
        .transpose()
        .map_err(to_js)?;

    let document = WebDocument::current().ok_or_else(|| to_js(SurveyError::missing("document")))?;
    let widget = if root.id().as_deref() == Some(config.widget_id.as_str()) {
        root
    } else {
        root.descendant_by_id(&config.widget_id).unwrap_or(root)
    };

    let report = SurveyController::new(document, widget, mode, config).mount();
    serde_json::to_string(&report).map_err(|err| JsValue::from_str(&err.to_string()))
}
