//! Click handler of the form's submit controls.
//!
//! The click never posts the form by itself. The required choosers are
//! checked first; a failure is reported with a blocking alert, a pass raises
//! the form's real submit, which the snapshot serializer observes.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info, warn};
use survey_common::model::submission::SubmissionFlow;
use survey_common::model::validation::{check_required_selections, ValidationFailure, ValidationTarget};
use survey_common::{SurveyConfig, SurveyError};

use crate::dom::{EventKind, SurveyDocument, SurveyElement};

/// Checks the required choosers of the page.
pub fn validate<D: SurveyDocument>(document: &D, config: &SurveyConfig) -> Result<(), ValidationFailure> {
    check_required_selections(&config.unselected_value, |target| {
        let id = match target {
            ValidationTarget::Project => &config.project_select_id,
            ValidationTarget::Grade => &config.grade_select_id,
        };
        document.element_by_id(id).map(|chooser| chooser.value())
    })
}

/// Submit controls of `form`: `<input type=submit>` and `<button type=submit>`.
pub fn submit_controls<E: SurveyElement>(form: &E) -> Vec<E> {
    let is_submit = |el: &E| {
        el.attribute("type")
            .is_some_and(|t| t.trim().eq_ignore_ascii_case("submit"))
    };
    let mut controls: Vec<E> = form.descendants_by_tag("input").into_iter().filter(is_submit).collect();
    controls.extend(form.descendants_by_tag("button").into_iter().filter(is_submit));
    controls
}

/// Runs one submit attempt.
pub fn handle_submit_click<D: SurveyDocument>(
    document: &D,
    form: &D::Element,
    flow: &RefCell<SubmissionFlow>,
    config: &SurveyConfig,
) {
    let mut state = flow.borrow_mut();
    if let Some(previous) = state.last_failure() {
        debug!("Retrying submission blocked by: {}", previous);
    }
    if let Err(err) = state.begin_validation() {
        debug!("Ignoring submit click: {}", err);
        return;
    }
    drop(state);

    match validate(document, config) {
        Err(failure) => {
            if let Err(err) = flow.borrow_mut().block(failure) {
                warn!("{}", err);
            }
            info!("Submission blocked: {}", SurveyError::MissingRequiredSelection(failure));
            document.alert(failure.message());
        }
        Ok(()) => {
            if let Err(err) = flow.borrow_mut().pass() {
                warn!("{}", err);
                return;
            }
            document.submit(form);
        }
    }
}

/// Intercepts clicks on the submit controls of `form`. Returns how many
/// controls were bound; controls bound earlier are left alone.
pub fn bind<D: SurveyDocument>(
    document: &D,
    form: &D::Element,
    flow: &Rc<RefCell<SubmissionFlow>>,
    config: &Rc<SurveyConfig>,
    instance_id: &str,
) -> usize {
    let mut bound = 0;
    for control in submit_controls(form) {
        if control.attribute(&config.augmented_attribute).is_some() {
            continue;
        }
        control.set_attribute(&config.augmented_attribute, instance_id);

        let document = document.clone();
        let form = form.clone();
        let flow = flow.clone();
        let config = config.clone();
        control.add_listener(
            EventKind::Click,
            Box::new(move |event| {
                event.prevent_default();
                handle_submit_click(&document, &form, &flow, &config);
            }),
        );
        bound += 1;
    }
    bound
}
