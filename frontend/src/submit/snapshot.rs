//! Snapshot serializer bound to the form's submit event.
//!
//! The capture works on a detached deep copy of the widget: the options panel
//! and the augmented markers are dropped from the copy and the copy's markup
//! becomes the snapshot. The live panel is only removed afterwards, as the
//! last step before the post goes out.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};
use survey_common::model::snapshot::Snapshot;
use survey_common::model::submission::SubmissionFlow;
use survey_common::{SurveyConfig, SurveyError};

use crate::dom::{EventKind, SurveyDocument, SurveyElement};

/// Markup of `widget` without its options panel or augmented markers. The
/// page is not modified.
pub fn capture<E: SurveyElement>(widget: &E, config: &SurveyConfig) -> Result<Snapshot, SurveyError> {
    let copy = widget
        .detached_copy()
        .ok_or_else(|| SurveyError::missing("detached widget copy"))?;

    match copy.descendant_by_id(&config.options_panel_id) {
        Some(panel) => panel.remove(),
        None => debug!("Widget has no #{} panel to exclude", config.options_panel_id),
    }
    for element in copy.descendants_by_tag("*") {
        element.remove_attribute(&config.augmented_attribute);
    }

    Ok(Snapshot::new(copy.inner_html()))
}

/// Writes `snapshot` into the hidden snapshot field.
pub fn write<D: SurveyDocument>(document: &D, snapshot: &Snapshot, config: &SurveyConfig) -> Result<(), SurveyError> {
    let field = document
        .element_by_id(&config.snapshot_field_id)
        .ok_or_else(|| SurveyError::missing(format!("#{}", config.snapshot_field_id)))?;
    field.set_value(snapshot.as_str());
    Ok(())
}

/// Handles the form's submit event.
pub fn handle_submit<D: SurveyDocument>(
    document: &D,
    widget: &D::Element,
    flow: &RefCell<SubmissionFlow>,
    config: &SurveyConfig,
) {
    if !flow.borrow().is_capturing() {
        debug!("Submit event outside a validated attempt; snapshot left as is");
        return;
    }

    match capture(widget, config).and_then(|snapshot| {
        write(document, &snapshot, config)?;
        Ok(snapshot)
    }) {
        Ok(snapshot) => debug!("Captured survey snapshot ({} bytes)", snapshot.as_str().len()),
        Err(err) => debug!("Snapshot skipped: {}", err),
    }

    if let Some(panel) = widget.descendant_by_id(&config.options_panel_id) {
        panel.remove();
    }

    if let Err(err) = flow.borrow_mut().finish() {
        warn!("{}", err);
    }
}

/// Observes the submit event of `form`. Returns `false` when the form was
/// already bound.
pub fn bind<D: SurveyDocument>(
    document: &D,
    form: &D::Element,
    widget: &D::Element,
    flow: &Rc<RefCell<SubmissionFlow>>,
    config: &Rc<SurveyConfig>,
    instance_id: &str,
) -> bool {
    if form.attribute(&config.augmented_attribute).is_some() {
        return false;
    }
    form.set_attribute(&config.augmented_attribute, instance_id);

    let document = document.clone();
    let widget = widget.clone();
    let flow = flow.clone();
    let config = config.clone();
    form.add_listener(
        EventKind::Submit,
        Box::new(move |_| handle_submit(&document, &widget, &flow, &config)),
    );
    true
}
