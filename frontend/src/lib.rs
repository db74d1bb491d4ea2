//! Survey widget controller for server rendered survey pages.
//!
//! The controller works against the `dom` seam. In the browser it is mounted
//! either by the `SurveyWidget` yew component or by the `mount_survey` entry
//! point; the test-suite mounts it on the in-memory host.

pub mod app;
pub mod augment;
pub mod components;
pub mod controller;
pub mod dom;
pub mod entry;
pub mod logging;
pub mod mode;
pub mod submit;

pub use controller::{MountReport, SurveyController};
pub use survey_common::{SurveyConfig, SurveyError};
