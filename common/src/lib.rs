//! DOM-independent model shared by the survey widget controller.
//!
//! Everything here is plain data and rules: the widget mode, how controls are
//! classified into survey fields, the required-selection checks, the
//! submission state machine, the snapshot handed to the server and the
//! configuration that names every DOM target. The `frontend` crate wires
//! these into a live (or in-memory) page.

pub mod config;
pub mod error;
pub mod model;

pub use config::SurveyConfig;
pub use error::SurveyError;
