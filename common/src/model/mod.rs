pub mod field;
pub mod form_post;
pub mod mode;
pub mod snapshot;
pub mod submission;
pub mod validation;
