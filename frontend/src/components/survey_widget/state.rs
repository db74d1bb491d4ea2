//! Runtime state of the `SurveyWidget` component.

use yew::prelude::*;

use crate::controller::{MountReport, SurveyController};
use crate::dom::web::WebDocument;

pub struct SurveyWidget {
    /// Host `<div>` the server markup is rendered into.
    pub host_ref: NodeRef,

    /// Guards the one-time controller mount in `rendered`.
    pub loaded: bool,

    /// Controller of the mounted widget. Its listeners stay attached to the
    /// page even when this is dropped.
    pub controller: Option<SurveyController<WebDocument>>,

    /// Result of the mount, kept for the status line.
    pub report: Option<MountReport>,

    pub error: Option<String>,
}

impl SurveyWidget {
    pub fn new() -> Self {
        Self {
            host_ref: NodeRef::default(),
            loaded: false,
            controller: None,
            report: None,
            error: None,
        }
    }
}
