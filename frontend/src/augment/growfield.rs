//! `growfield`: a textarea that grows with its content.
//!
//! The rendered height at attach time is the floor. Each input resizes the
//! control to `max(floor, content height)`, so long answers never scroll
//! inside the box and deleting text never collapses it below its original
//! size.

use std::cell::Cell;
use std::rc::Rc;

use log::trace;

use crate::dom::{EventKind, SurveyElement};

#[derive(Debug)]
pub struct GrowField {
    min_height: u32,
    height: Cell<u32>,
}

impl GrowField {
    pub fn new(initial_height: u32) -> Self {
        Self {
            min_height: initial_height,
            height: Cell::new(initial_height),
        }
    }

    pub fn min_height(&self) -> u32 {
        self.min_height
    }

    /// Height last applied to the control.
    pub fn height(&self) -> u32 {
        self.height.get()
    }

    /// Computes and records the height for the given content height.
    pub fn fit(&self, content_height: u32) -> u32 {
        let height = content_height.max(self.min_height);
        self.height.set(height);
        height
    }
}

fn resize<E: SurveyElement>(grow: &GrowField, element: &E) {
    let height = grow.fit(element.content_height());
    trace!("growfield height {}px", height);
    element.set_style("height", &format!("{}px", height));
}

/// Registers the auto-grow behavior on `element` and fits it once.
pub fn attach<E: SurveyElement>(element: &E) -> Rc<GrowField> {
    let grow = Rc::new(GrowField::new(element.rendered_height()));
    resize(&grow, element);

    let behavior = grow.clone();
    let target = element.clone();
    element.add_listener(EventKind::Input, Box::new(move |_| resize(&behavior, &target)));

    grow
}
