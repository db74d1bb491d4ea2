//! Survey widget controller.
//!
//! Responsibilities
//! - Resolve the widget mode once, at construction.
//! - Pin the width of the table cell hosting the widget.
//! - Attach the field behaviors of the mode.
//! - Bind required selection checks and the snapshot serializer to the
//!   enclosing form.
//!
//! Every DOM lookup that misses degrades to a logged no-op. Mounting twice on
//! the same widget is harmless: already augmented elements are skipped.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info, warn};
use serde::Serialize;
use survey_common::model::mode::SurveyMode;
use survey_common::model::snapshot::Snapshot;
use survey_common::model::submission::{SubmissionFlow, SubmissionPhase};
use survey_common::{SurveyConfig, SurveyError};
use uuid::Uuid;

use crate::augment::{AugmentReport, FieldAugmenter};
use crate::dom::{SurveyDocument, SurveyElement};
use crate::mode::resolve_mode;
use crate::submit::{self, SubmissionBinding};

/// Outcome of `SurveyController::mount`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MountReport {
    pub mode: SurveyMode,
    pub fields: AugmentReport,
    pub layout_applied: bool,
    pub submission: SubmissionBinding,
}

pub struct SurveyController<D: SurveyDocument> {
    document: D,
    widget: D::Element,
    mode: SurveyMode,
    config: Rc<SurveyConfig>,
    instance_id: String,
    flow: Rc<RefCell<SubmissionFlow>>,
}

impl<D: SurveyDocument> SurveyController<D> {
    /// Controller for `widget`. `mode` is the mode the renderer asked for;
    /// without one the widget's marker class decides.
    pub fn new(document: D, widget: D::Element, mode: Option<SurveyMode>, config: SurveyConfig) -> Self {
        let mode = resolve_mode(mode, &widget, &config);
        Self {
            document,
            widget,
            mode,
            config: Rc::new(config),
            instance_id: Uuid::new_v4().to_string(),
            flow: Rc::new(RefCell::new(SubmissionFlow::new())),
        }
    }

    /// Controller for the widget whose id is configured in `config`.
    pub fn locate(document: D, mode: Option<SurveyMode>, config: SurveyConfig) -> Result<Self, SurveyError> {
        let widget = document
            .element_by_id(&config.widget_id)
            .ok_or_else(|| SurveyError::missing(format!("#{}", config.widget_id)))?;
        Ok(Self::new(document, widget, mode, config))
    }

    pub fn mode(&self) -> SurveyMode {
        self.mode
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    pub fn widget(&self) -> &D::Element {
        &self.widget
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.flow.borrow().phase()
    }

    /// Runs setup on the widget.
    pub fn mount(&self) -> MountReport {
        let layout_applied = self.apply_layout();
        let fields = FieldAugmenter::new(&self.config, &self.instance_id).augment(&self.widget, self.mode);

        let submission = match self.form() {
            Ok(form) => submit::bind(
                &self.document,
                &form,
                &self.widget,
                &self.flow,
                &self.config,
                &self.instance_id,
            ),
            Err(err) => {
                warn!("[{}] Submission handling not bound: {}", self.instance_id, err);
                SubmissionBinding::default()
            }
        };

        info!(
            "[{}] Survey mounted in {} mode: {} fields augmented, {} skipped, submission bound: {}",
            self.instance_id,
            self.mode,
            fields.augmented,
            fields.already_augmented,
            submission.is_bound()
        );

        MountReport {
            mode: self.mode,
            fields,
            layout_applied,
            submission,
        }
    }

    /// Snapshot of the widget as it would be posted right now.
    pub fn capture_snapshot(&self) -> Result<Snapshot, SurveyError> {
        submit::snapshot::capture(&self.widget, &self.config)
    }

    fn form(&self) -> Result<D::Element, SurveyError> {
        self.widget
            .closest("form", "")
            .ok_or_else(|| SurveyError::missing("form enclosing the survey widget"))
    }

    fn apply_layout(&self) -> bool {
        let cell = self
            .widget
            .closest(&self.config.layout_cell_tag, &self.config.layout_cell_class);
        match cell {
            Some(cell) => {
                cell.set_style("float", "left");
                cell.set_style("width", &format!("{}px", self.config.layout_cell_width_px));
                true
            }
            None => {
                debug!(
                    "[{}] No {}.{} around the widget; layout left as is",
                    self.instance_id, self.config.layout_cell_tag, self.config.layout_cell_class
                );
                false
            }
        }
    }
}
