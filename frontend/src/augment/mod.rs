//! Field augmentation: attaches presentation behaviors to the survey's
//! controls according to the widget mode.
//!
//! - `Create`: text boxes and textareas clear their default text on first
//!   use; textareas also scroll and grow with their content.
//! - `ViewSavedResult`: textareas scroll and grow. Multiple choice groups are
//!   walked option by option but their checked state is left as rendered.
//!
//! Each traversal runs over its own collection of fields. A control that got
//! its behaviors is tagged with the augmented attribute and skipped by any
//! later pass, so running setup twice never binds a listener twice.

pub mod growfield;
pub mod placeholder;

use log::{debug, trace};
use serde::Serialize;
use survey_common::model::field::FieldKind;
use survey_common::model::mode::SurveyMode;
use survey_common::SurveyConfig;

use crate::dom::SurveyElement;

/// One survey question control.
#[derive(Clone)]
pub struct Field<E> {
    pub kind: FieldKind,
    pub element: E,
}

/// What one augmentation pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AugmentReport {
    pub augmented: usize,
    pub placeholders: usize,
    pub growfields: usize,
    pub multi_pick_options: usize,
    pub already_augmented: usize,
}

/// Collects the widget's fields in document order.
pub fn collect_fields<E: SurveyElement>(widget: &E, config: &SurveyConfig) -> Vec<Field<E>> {
    widget
        .descendants_by_tag("*")
        .into_iter()
        .filter_map(|element| {
            let tag = element.tag_name();
            let input_type = element.attribute("type");
            let is_group = element.has_class(&config.multi_pick_class);
            let inside_group = !is_group
                && tag == "input"
                && element.closest("*", &config.multi_pick_class).is_some();
            FieldKind::classify(&tag, input_type.as_deref(), is_group, inside_group)
                .map(|kind| Field { kind, element })
        })
        .collect()
}

pub struct FieldAugmenter<'a> {
    config: &'a SurveyConfig,
    instance_id: &'a str,
}

impl<'a> FieldAugmenter<'a> {
    pub fn new(config: &'a SurveyConfig, instance_id: &'a str) -> Self {
        Self {
            config,
            instance_id,
        }
    }

    /// Attaches the behaviors of `mode` to every field of `widget`.
    pub fn augment<E: SurveyElement>(&self, widget: &E, mode: SurveyMode) -> AugmentReport {
        let fields = collect_fields(widget, self.config);
        let mut report = AugmentReport::default();

        match mode {
            SurveyMode::Create => {
                self.preserve_text_defaults(&fields, &mut report);
                self.grow_text_areas(&fields, true, &mut report);
            }
            SurveyMode::ViewSavedResult => {
                self.grow_text_areas(&fields, false, &mut report);
                self.visit_multi_picks(&fields, &mut report);
            }
        }

        debug!("Augmented {} fields in {} mode: {:?}", fields.len(), mode, report);
        report
    }

    fn preserve_text_defaults<E: SurveyElement>(&self, fields: &[Field<E>], report: &mut AugmentReport) {
        for field in fields.iter().filter(|f| f.kind == FieldKind::Text) {
            if !self.claim(&field.element, report) {
                continue;
            }
            placeholder::attach(&field.element);
            report.placeholders += 1;
        }
    }

    fn grow_text_areas<E: SurveyElement>(
        &self,
        fields: &[Field<E>],
        with_placeholder: bool,
        report: &mut AugmentReport,
    ) {
        for field in fields.iter().filter(|f| f.kind == FieldKind::TextArea) {
            if !self.claim(&field.element, report) {
                continue;
            }
            if with_placeholder && field.kind.holds_default_text() {
                placeholder::attach(&field.element);
                report.placeholders += 1;
            }
            // Attribute for the posted markup, style for the live page.
            field.element.set_attribute("overflow", "auto");
            field.element.set_style("overflow", "auto");
            growfield::attach(&field.element);
            report.growfields += 1;
        }
    }

    /// Walks every option of every multiple choice group without touching
    /// its checked state.
    fn visit_multi_picks<E: SurveyElement>(&self, fields: &[Field<E>], report: &mut AugmentReport) {
        for group in fields.iter().filter(|f| f.kind == FieldKind::MultiPick) {
            let options = group.element.descendants_by_tag("input");
            if options.is_empty() {
                trace!("Multiple choice group without options");
                continue;
            }
            for option in options {
                // TODO: restore checked state from saved answers once the
                // results view states whether it wants that.
                trace!(
                    "Multiple choice option {:?} checked={}",
                    option.attribute("value"),
                    option.attribute("checked").is_some()
                );
                report.multi_pick_options += 1;
            }
        }
    }

    /// Marks `element` as augmented by this instance. Returns `false` when an
    /// earlier pass already did.
    fn claim<E: SurveyElement>(&self, element: &E, report: &mut AugmentReport) -> bool {
        let marker = &self.config.augmented_attribute;
        if let Some(owner) = element.attribute(marker) {
            trace!("Field already augmented by {}", owner);
            report.already_augmented += 1;
            return false;
        }
        element.set_attribute(marker, self.instance_id);
        report.augmented += 1;
        true
    }
}
