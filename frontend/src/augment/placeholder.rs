//! `preserveDefaultText`: a control's initial value acts as placeholder text
//! that disappears on the first interaction.

use std::cell::Cell;
use std::rc::Rc;

use log::trace;

use crate::dom::{EventKind, SurveyElement};

/// Default text of one control and whether it may still be cleared.
#[derive(Debug)]
pub struct PreserveDefaultText {
    default_text: String,
    armed: Cell<bool>,
}

impl PreserveDefaultText {
    pub fn new(default_text: impl Into<String>) -> Self {
        Self {
            default_text: default_text.into(),
            armed: Cell::new(true),
        }
    }

    pub fn default_text(&self) -> &str {
        &self.default_text
    }

    /// `true` until the first interaction has been seen.
    pub fn is_armed(&self) -> bool {
        self.armed.get()
    }

    /// Consumes the first interaction. Returns `true` when the control still
    /// shows exactly its default text and must be cleared. Every later call
    /// returns `false`.
    pub fn take_first_interaction(&self, current_value: &str) -> bool {
        self.armed.replace(false) && current_value == self.default_text
    }
}

/// Stores the control's current value as its default and clears it on the
/// first focus or key press.
pub fn attach<E: SurveyElement>(element: &E) -> Rc<PreserveDefaultText> {
    let behavior = Rc::new(PreserveDefaultText::new(element.value()));

    for kind in [EventKind::Focus, EventKind::KeyDown] {
        let behavior = behavior.clone();
        let target = element.clone();
        element.add_listener(
            kind,
            Box::new(move |_| {
                if behavior.take_first_interaction(&target.value()) {
                    trace!("Clearing default text {:?}", behavior.default_text());
                    target.set_value("");
                }
            }),
        );
    }

    behavior
}
