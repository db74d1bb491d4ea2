//! DOM seam used by the survey controller.
//!
//! The controller never talks to `web_sys` directly. It works against the two
//! traits below, which are implemented for the live browser DOM (`web`) and
//! for an in-memory page built from markup (`memory`). The in-memory host is
//! what the test-suite drives.

pub mod memory;
pub mod web;

use std::fmt;

/// DOM events the controller listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Focus,
    KeyDown,
    Input,
    Click,
    Submit,
}

impl EventKind {
    /// Name used with `addEventListener`.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Focus => "focus",
            EventKind::KeyDown => "keydown",
            EventKind::Input => "input",
            EventKind::Click => "click",
            EventKind::Submit => "submit",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event handed to listeners. Only default prevention is exposed.
#[derive(Debug)]
pub struct DomEvent {
    kind: EventKind,
    default_prevented: bool,
}

impl DomEvent {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            default_prevented: false,
        }
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

pub type Listener = Box<dyn FnMut(&mut DomEvent)>;

/// Parses a CSS pixel length such as `"42px"` or `"41.6px"`, rounded.
pub fn css_px(value: &str) -> Option<u32> {
    let px = value.trim().strip_suffix("px")?.trim().parse::<f64>().ok()?;
    (px.is_finite() && px >= 0.0).then(|| px.round().min(u32::MAX as f64) as u32)
}

/// Handle to one element of the page.
///
/// Handles are cheap to clone and compare by identity of the underlying node.
/// Operations on nodes that have been removed still succeed; they simply no
/// longer affect the page.
pub trait SurveyElement: Clone + 'static {
    /// Lowercase tag name.
    fn tag_name(&self) -> String;

    fn attribute(&self, name: &str) -> Option<String>;

    fn set_attribute(&self, name: &str, value: &str);

    fn remove_attribute(&self, name: &str);

    fn id(&self) -> Option<String> {
        self.attribute("id").filter(|id| !id.is_empty())
    }

    fn has_class(&self, class: &str) -> bool {
        self.attribute("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    fn classes(&self) -> Vec<String> {
        self.attribute("class")
            .map(|classes| classes.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Current value of a form control (the live value, not the markup).
    fn value(&self) -> String;

    fn set_value(&self, value: &str);

    /// Sets one inline style property.
    fn set_style(&self, property: &str, value: &str);

    /// Height the control currently occupies, in pixels.
    fn rendered_height(&self) -> u32;

    /// Height the control's content needs, in pixels. Hosts may reset the
    /// inline height while measuring; callers set the final height right
    /// after.
    fn content_height(&self) -> u32;

    /// Descendant elements in document order. `"*"` matches every tag.
    fn descendants_by_tag(&self, tag: &str) -> Vec<Self>;

    fn descendant_by_id(&self, id: &str) -> Option<Self>;

    /// Nearest ancestor (excluding `self`) with the given tag (`"*"` for any)
    /// and, when `class` is non-empty, the given class.
    fn closest(&self, tag: &str, class: &str) -> Option<Self>;

    /// Deep copy that is not attached to the page.
    fn detached_copy(&self) -> Option<Self>;

    /// Detaches the element from its parent.
    fn remove(&self);

    /// Serialized markup of the element's children.
    fn inner_html(&self) -> String;

    fn add_listener(&self, kind: EventKind, listener: Listener);
}

/// The page hosting one or more survey widgets.
pub trait SurveyDocument: Clone + 'static {
    type Element: SurveyElement;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// Shows a blocking message to the user.
    fn alert(&self, message: &str);

    /// Raises the form's submit event and, unless a listener prevents it,
    /// posts the form.
    fn submit(&self, form: &Self::Element);
}
