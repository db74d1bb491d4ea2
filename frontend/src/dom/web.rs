//! Browser host built on `web_sys`.
//!
//! Thin adapters: every trait method maps onto the matching DOM API. Listener
//! closures are leaked with `Closure::forget` because they live as long as the
//! page, the same way the widget's markup does.

use log::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, EventInit, HtmlCollection, HtmlElement, HtmlFormElement,
    HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement,
};

use super::{css_px, DomEvent, EventKind, Listener, SurveyDocument, SurveyElement};

/// The live page.
#[derive(Clone)]
pub struct WebDocument {
    document: Document,
}

/// A live DOM element.
#[derive(Clone)]
pub struct WebElement {
    element: Element,
}

impl WebDocument {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// The document of the current window, if there is one.
    pub fn current() -> Option<Self> {
        web_sys::window()
            .and_then(|window| window.document())
            .map(Self::new)
    }
}

impl WebElement {
    pub fn new(element: Element) -> Self {
        Self { element }
    }

    pub fn element(&self) -> &Element {
        &self.element
    }

    fn html_element(&self) -> Option<&HtmlElement> {
        self.element.dyn_ref::<HtmlElement>()
    }
}

fn collect(collection: HtmlCollection) -> Vec<WebElement> {
    (0..collection.length())
        .filter_map(|i| collection.item(i))
        .map(WebElement::new)
        .collect()
}

impl SurveyDocument for WebDocument {
    type Element = WebElement;

    fn element_by_id(&self, id: &str) -> Option<WebElement> {
        self.document.get_element_by_id(id).map(WebElement::new)
    }

    fn alert(&self, message: &str) {
        match web_sys::window() {
            Some(window) => {
                if window.alert_with_message(message).is_err() {
                    warn!("alert() failed for message {:?}", message);
                }
            }
            None => warn!("No window to alert {:?}", message),
        }
    }

    fn submit(&self, form: &WebElement) {
        let init = EventInit::new();
        init.set_bubbles(true);
        init.set_cancelable(true);
        let event = match Event::new_with_event_init_dict("submit", &init) {
            Ok(event) => event,
            Err(err) => {
                warn!("Could not create submit event: {:?}", err);
                return;
            }
        };

        // dispatch_event returns false when a listener called preventDefault.
        match form.element.dispatch_event(&event) {
            Ok(true) => match form.element.dyn_ref::<HtmlFormElement>() {
                Some(form) => {
                    if let Err(err) = form.submit() {
                        warn!("Form submission failed: {:?}", err);
                    }
                }
                None => debug!("Submit target is not a <form>"),
            },
            Ok(false) => debug!("Form submission prevented by a listener"),
            Err(err) => warn!("Could not dispatch submit event: {:?}", err),
        }
    }
}

impl SurveyElement for WebElement {
    fn tag_name(&self) -> String {
        self.element.tag_name().to_ascii_lowercase()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.element.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        if let Err(err) = self.element.set_attribute(name, value) {
            warn!("Could not set attribute {}: {:?}", name, err);
        }
    }

    fn remove_attribute(&self, name: &str) {
        if let Err(err) = self.element.remove_attribute(name) {
            warn!("Could not remove attribute {}: {:?}", name, err);
        }
    }

    fn has_class(&self, class: &str) -> bool {
        self.element.class_list().contains(class)
    }

    fn value(&self) -> String {
        if let Some(input) = self.element.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(textarea) = self.element.dyn_ref::<HtmlTextAreaElement>() {
            textarea.value()
        } else if let Some(select) = self.element.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else {
            self.element.get_attribute("value").unwrap_or_default()
        }
    }

    fn set_value(&self, value: &str) {
        if let Some(input) = self.element.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(textarea) = self.element.dyn_ref::<HtmlTextAreaElement>() {
            textarea.set_value(value);
        } else if let Some(select) = self.element.dyn_ref::<HtmlSelectElement>() {
            select.set_value(value);
        } else {
            self.set_attribute("value", value);
        }
    }

    fn set_style(&self, property: &str, value: &str) {
        if let Some(html) = self.html_element() {
            html.style().set_property(property, value).ok();
        }
    }

    fn rendered_height(&self) -> u32 {
        // The computed height is in the same box model `set_style("height")`
        // writes, so refitting an unedited control keeps its size.
        let computed = web_sys::window()
            .and_then(|window| window.get_computed_style(&self.element).ok().flatten())
            .and_then(|style| style.get_property_value("height").ok())
            .and_then(|height| css_px(&height));
        computed.unwrap_or_else(|| self.element.client_height().max(0) as u32)
    }

    fn content_height(&self) -> u32 {
        // Collapse to the content before measuring, otherwise scrollHeight
        // never reports less than the current box.
        if let Some(html) = self.html_element() {
            html.style().set_property("height", "auto").ok();
        }
        self.element.scroll_height().max(0) as u32
    }

    fn descendants_by_tag(&self, tag: &str) -> Vec<Self> {
        collect(self.element.get_elements_by_tag_name(tag))
    }

    fn descendant_by_id(&self, id: &str) -> Option<Self> {
        let selector = format!("[id=\"{}\"]", id.replace('"', "\\\""));
        self.element
            .query_selector(&selector)
            .ok()
            .flatten()
            .map(WebElement::new)
    }

    fn closest(&self, tag: &str, class: &str) -> Option<Self> {
        let mut current = self.element.parent_element();
        while let Some(element) = current {
            if (tag == "*" || element.tag_name().eq_ignore_ascii_case(tag))
                && (class.is_empty() || element.class_list().contains(class))
            {
                return Some(WebElement::new(element));
            }
            current = element.parent_element();
        }
        None
    }

    fn detached_copy(&self) -> Option<Self> {
        self.element
            .clone_node_with_deep(true)
            .ok()
            .and_then(|node| node.dyn_into::<Element>().ok())
            .map(WebElement::new)
    }

    fn remove(&self) {
        self.element.remove();
    }

    fn inner_html(&self) -> String {
        self.element.inner_html()
    }

    fn add_listener(&self, kind: EventKind, mut listener: Listener) {
        let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let mut dom_event = DomEvent::new(kind);
            listener(&mut dom_event);
            if dom_event.is_default_prevented() {
                event.prevent_default();
            }
        });
        if let Err(err) = self
            .element
            .add_event_listener_with_callback(kind.as_str(), closure.as_ref().unchecked_ref())
        {
            warn!("Could not attach {} listener: {:?}", kind, err);
        }
        closure.forget();
    }
}
