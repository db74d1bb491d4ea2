//! In-memory page host.
//!
//! Parses markup with `html5ever` into an `RcDom` and layers the bits of
//! browser behavior the controller relies on over it: live control values,
//! inline styles, event listeners with default prevention, a simple line
//! based layout model, blocking alerts and form posts.
//!
//! Layout is simulated: a textarea renders `rows` lines (2 when unset) and its
//! content needs one line per line of text, each `line_height` pixels tall.
//! Tests can override the content height of any element.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use html5ever::serialize::{serialize, SerializeOpts, TraversalScope};
use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, Attribute, LocalName, Namespace, QualName};
use log::{debug, warn};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom, SerializableHandle};
use survey_common::model::form_post::FormPost;
use survey_common::SurveyConfig;

use super::{css_px, DomEvent, EventKind, Listener, SurveyDocument, SurveyElement};

const DEFAULT_TEXTAREA_ROWS: u32 = 2;

type SharedListener = Rc<RefCell<Listener>>;

struct PageState {
    dom: RcDom,
    line_height: u32,
    listeners: RefCell<HashMap<usize, Vec<(EventKind, SharedListener)>>>,
    values: RefCell<HashMap<usize, String>>,
    content_heights: RefCell<HashMap<usize, u32>>,
    focused: RefCell<Option<usize>>,
    alerts: RefCell<Vec<String>>,
    posts: RefCell<Vec<FormPost>>,
}

/// A parsed page with simulated browser behavior.
#[derive(Clone)]
pub struct MemoryPage {
    state: Rc<PageState>,
}

/// Element handle into a `MemoryPage`.
#[derive(Clone)]
pub struct MemoryElement {
    node: Handle,
    page: Weak<PageState>,
}

fn key(node: &Handle) -> usize {
    Rc::as_ptr(node) as usize
}

fn parent_of(node: &Handle) -> Option<Handle> {
    let weak = node.parent.take()?;
    let parent = weak.upgrade();
    node.parent.set(Some(weak));
    parent
}

fn local_name(node: &Handle) -> Option<String> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.to_string()),
        _ => None,
    }
}

fn attr_of(node: &Handle, attribute: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|a| a.name.local.eq_str_ignore_ascii_case(attribute))
            .map(|a| a.value.to_string()),
        _ => None,
    }
}

fn text_content(node: &Handle, out: &mut String) {
    for child in node.children.borrow().iter() {
        match &child.data {
            NodeData::Text { contents } => out.push_str(&contents.borrow()),
            NodeData::Element { .. } => text_content(child, out),
            _ => {}
        }
    }
}

fn collect_elements(node: &Handle, out: &mut Vec<Handle>) {
    for child in node.children.borrow().iter() {
        if let NodeData::Element { .. } = child.data {
            out.push(child.clone());
            collect_elements(child, out);
        }
    }
}

fn deep_clone(node: &Handle) -> Handle {
    let data = match &node.data {
        NodeData::Document => NodeData::Document,
        NodeData::Doctype {
            name,
            public_id,
            system_id,
        } => NodeData::Doctype {
            name: name.clone(),
            public_id: public_id.clone(),
            system_id: system_id.clone(),
        },
        NodeData::Text { contents } => NodeData::Text {
            contents: RefCell::new(contents.borrow().clone()),
        },
        NodeData::Comment { contents } => NodeData::Comment {
            contents: contents.clone(),
        },
        NodeData::Element {
            name,
            attrs,
            template_contents,
            mathml_annotation_xml_integration_point,
        } => NodeData::Element {
            name: name.clone(),
            attrs: RefCell::new(attrs.borrow().clone()),
            template_contents: RefCell::new(template_contents.borrow().as_ref().map(deep_clone)),
            mathml_annotation_xml_integration_point: *mathml_annotation_xml_integration_point,
        },
        NodeData::ProcessingInstruction { target, contents } => NodeData::ProcessingInstruction {
            target: target.clone(),
            contents: contents.clone(),
        },
    };

    let copy = Node::new(data);
    for child in node.children.borrow().iter() {
        let child_copy = deep_clone(child);
        child_copy.parent.set(Some(Rc::downgrade(&copy)));
        copy.children.borrow_mut().push(child_copy);
    }
    copy
}

fn parse_style(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter_map(|decl| {
            let (prop, value) = decl.split_once(':')?;
            let prop = prop.trim();
            (!prop.is_empty()).then(|| (prop.to_ascii_lowercase(), value.trim().to_string()))
        })
        .collect()
}

impl MemoryPage {
    /// Parses a full HTML document laid out with the default configuration.
    pub fn parse(html: &str) -> Self {
        Self::parse_with_config(html, &SurveyConfig::default())
    }

    /// Parses a full HTML document laid out with `config.line_height_px`.
    pub fn parse_with_config(html: &str, config: &SurveyConfig) -> Self {
        let dom = parse_document(RcDom::default(), Default::default()).one(html);
        Self {
            state: Rc::new(PageState {
                dom,
                line_height: config.line_height_px.max(1),
                listeners: RefCell::new(HashMap::new()),
                values: RefCell::new(HashMap::new()),
                content_heights: RefCell::new(HashMap::new()),
                focused: RefCell::new(None),
                alerts: RefCell::new(Vec::new()),
                posts: RefCell::new(Vec::new()),
            }),
        }
    }

    fn wrap(&self, node: Handle) -> MemoryElement {
        MemoryElement {
            node,
            page: Rc::downgrade(&self.state),
        }
    }

    fn document(&self) -> &Handle {
        &self.state.dom.document
    }

    /// Every element of the page matching `tag`, in document order.
    pub fn elements_by_tag(&self, tag: &str) -> Vec<MemoryElement> {
        let mut all = Vec::new();
        collect_elements(self.document(), &mut all);
        all.into_iter()
            .filter(|node| tag == "*" || local_name(node).is_some_and(|n| n.eq_ignore_ascii_case(tag)))
            .map(|node| self.wrap(node))
            .collect()
    }

    /// Runs the listeners registered for `kind` on `element`. Returns `false`
    /// when one of them prevented the default action.
    pub fn dispatch(&self, element: &MemoryElement, kind: EventKind) -> bool {
        let listeners: Vec<SharedListener> = self
            .state
            .listeners
            .borrow()
            .get(&key(&element.node))
            .map(|registered| {
                registered
                    .iter()
                    .filter(|(k, _)| *k == kind)
                    .map(|(_, listener)| listener.clone())
                    .collect()
            })
            .unwrap_or_default();

        let mut event = DomEvent::new(kind);
        for listener in listeners {
            match listener.try_borrow_mut() {
                Ok(mut listener) => (*listener)(&mut event),
                Err(_) => warn!("Skipping re-entrant {} listener", event.kind()),
            }
        }
        !event.is_default_prevented()
    }

    /// Number of listeners of `kind` attached to `element`.
    pub fn listener_count(&self, element: &MemoryElement, kind: EventKind) -> usize {
        self.state
            .listeners
            .borrow()
            .get(&key(&element.node))
            .map_or(0, |registered| registered.iter().filter(|(k, _)| *k == kind).count())
    }

    /// Moves focus to `element`, firing `focus` if it was not focused yet.
    pub fn focus(&self, element: &MemoryElement) {
        let target = key(&element.node);
        let previous = self.state.focused.borrow_mut().replace(target);
        if previous != Some(target) {
            self.dispatch(element, EventKind::Focus);
        }
    }

    pub fn blur(&self) {
        self.state.focused.borrow_mut().take();
    }

    /// Types `text` at the end of the control like a user would: focus,
    /// key-down, value change, input.
    pub fn type_text(&self, element: &MemoryElement, text: &str) {
        self.focus(element);
        if self.dispatch(element, EventKind::KeyDown) {
            let value = format!("{}{}", element.value(), text);
            element.set_value(&value);
            self.dispatch(element, EventKind::Input);
        }
    }

    /// Picks `value` in a chooser.
    pub fn choose(&self, element: &MemoryElement, value: &str) {
        element.set_value(value);
        self.dispatch(element, EventKind::Input);
    }

    /// Clicks `element`. A submit control whose click is not prevented posts
    /// its form.
    pub fn click(&self, element: &MemoryElement) {
        let proceed = self.dispatch(element, EventKind::Click);
        let is_submit = matches!(element.tag_name().as_str(), "input" | "button")
            && element
                .attribute("type")
                .is_some_and(|t| t.eq_ignore_ascii_case("submit"));
        if proceed && is_submit {
            if let Some(form) = element.closest("form", "") {
                self.submit(&form);
            }
        }
    }

    /// Overrides the simulated content height of `element`.
    pub fn set_content_height(&self, element: &MemoryElement, px: u32) {
        self.state
            .content_heights
            .borrow_mut()
            .insert(key(&element.node), px);
    }

    /// Messages shown through `alert`, oldest first.
    pub fn alerts(&self) -> Vec<String> {
        self.state.alerts.borrow().clone()
    }

    /// Forms posted so far, oldest first.
    pub fn posts(&self) -> Vec<FormPost> {
        self.state.posts.borrow().clone()
    }

    fn collect_post(&self, form: &MemoryElement) -> FormPost {
        let mut post = FormPost::new(form.id());
        for control in form.descendants_by_tag("*") {
            let Some(name) = control.attribute("name").filter(|n| !n.is_empty()) else {
                continue;
            };
            if control.attribute("disabled").is_some() {
                continue;
            }
            match control.tag_name().as_str() {
                "input" => {
                    let ty = control
                        .attribute("type")
                        .unwrap_or_default()
                        .to_ascii_lowercase();
                    match ty.as_str() {
                        "submit" | "button" | "reset" | "image" | "file" => {}
                        "checkbox" | "radio" => {
                            if control.attribute("checked").is_some() {
                                let value = control.attribute("value").unwrap_or_else(|| "on".to_string());
                                post.push(name, value);
                            }
                        }
                        _ => post.push(name, control.value()),
                    }
                }
                "textarea" | "select" => post.push(name, control.value()),
                _ => {}
            }
        }
        post
    }
}

impl SurveyDocument for MemoryPage {
    type Element = MemoryElement;

    fn element_by_id(&self, id: &str) -> Option<MemoryElement> {
        let mut all = Vec::new();
        collect_elements(self.document(), &mut all);
        all.into_iter()
            .find(|node| attr_of(node, "id").as_deref() == Some(id))
            .map(|node| self.wrap(node))
    }

    fn alert(&self, message: &str) {
        debug!("alert: {}", message);
        self.state.alerts.borrow_mut().push(message.to_string());
    }

    fn submit(&self, form: &MemoryElement) {
        if !self.dispatch(form, EventKind::Submit) {
            debug!("Form submission prevented by a listener");
            return;
        }
        let post = self.collect_post(form);
        debug!("Posting form {:?} with {} entries", post.form_id, post.entries.len());
        self.state.posts.borrow_mut().push(post);
    }
}

impl MemoryElement {
    fn with_page<R>(&self, f: impl FnOnce(&PageState) -> R) -> Option<R> {
        self.page.upgrade().map(|page| f(page.as_ref()))
    }

    /// Value of one inline style property.
    pub fn style(&self, property: &str) -> Option<String> {
        let style = self.attribute("style")?;
        parse_style(&style)
            .into_iter()
            .find(|(prop, _)| prop.eq_ignore_ascii_case(property))
            .map(|(_, value)| value)
    }

    /// Inline `height` in pixels, if set.
    pub fn height_px(&self) -> Option<u32> {
        self.style("height").as_deref().and_then(css_px)
    }

    /// Whether the element is still attached to a document.
    pub fn is_connected(&self) -> bool {
        let mut current = self.node.clone();
        loop {
            if let NodeData::Document = current.data {
                return true;
            }
            match parent_of(&current) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    fn default_value(&self) -> String {
        match self.tag_name().as_str() {
            "textarea" => {
                let mut text = String::new();
                text_content(&self.node, &mut text);
                text
            }
            "select" => {
                let options = self.descendants_by_tag("option");
                options
                    .iter()
                    .find(|option| option.attribute("selected").is_some())
                    .or_else(|| options.first())
                    .map(|option| {
                        option.attribute("value").unwrap_or_else(|| {
                            let mut text = String::new();
                            text_content(&option.node, &mut text);
                            text.trim().to_string()
                        })
                    })
                    .unwrap_or_default()
            }
            _ => self.attribute("value").unwrap_or_default(),
        }
    }

    fn line_height(&self) -> u32 {
        self.with_page(|page| page.line_height).unwrap_or(16)
    }
}

impl SurveyElement for MemoryElement {
    fn tag_name(&self) -> String {
        local_name(&self.node).unwrap_or_default()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        attr_of(&self.node, name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        if let NodeData::Element { attrs, .. } = &self.node.data {
            let mut attrs = attrs.borrow_mut();
            match attrs.iter_mut().find(|a| a.name.local.eq_str_ignore_ascii_case(name)) {
                Some(existing) => existing.value = value.into(),
                None => attrs.push(Attribute {
                    name: QualName::new(None, Namespace::from(""), LocalName::from(name)),
                    value: value.into(),
                }),
            }
        }
    }

    fn remove_attribute(&self, name: &str) {
        if let NodeData::Element { attrs, .. } = &self.node.data {
            attrs
                .borrow_mut()
                .retain(|a| !a.name.local.eq_str_ignore_ascii_case(name));
        }
    }

    fn value(&self) -> String {
        self.with_page(|page| page.values.borrow().get(&key(&self.node)).cloned())
            .flatten()
            .unwrap_or_else(|| self.default_value())
    }

    fn set_value(&self, value: &str) {
        self.with_page(|page| {
            page.values
                .borrow_mut()
                .insert(key(&self.node), value.to_string())
        });
    }

    fn set_style(&self, property: &str, value: &str) {
        let mut declarations = self
            .attribute("style")
            .map(|style| parse_style(&style))
            .unwrap_or_default();
        let property = property.to_ascii_lowercase();
        match declarations.iter_mut().find(|(prop, _)| *prop == property) {
            Some(existing) => existing.1 = value.to_string(),
            None => declarations.push((property, value.to_string())),
        }
        let style = declarations
            .iter()
            .map(|(prop, value)| format!("{}: {};", prop, value))
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attribute("style", &style);
    }

    fn rendered_height(&self) -> u32 {
        if let Some(px) = self.height_px() {
            return px;
        }
        let line_height = self.line_height();
        if self.tag_name() == "textarea" {
            let rows = self
                .attribute("rows")
                .and_then(|rows| rows.trim().parse::<u32>().ok())
                .filter(|rows| *rows > 0)
                .unwrap_or(DEFAULT_TEXTAREA_ROWS);
            rows.saturating_mul(line_height)
        } else {
            line_height
        }
    }

    fn content_height(&self) -> u32 {
        if let Some(px) = self
            .with_page(|page| page.content_heights.borrow().get(&key(&self.node)).copied())
            .flatten()
        {
            return px;
        }
        let lines = u32::try_from(self.value().split('\n').count().max(1)).unwrap_or(u32::MAX);
        lines.saturating_mul(self.line_height())
    }

    fn descendants_by_tag(&self, tag: &str) -> Vec<Self> {
        let mut all = Vec::new();
        collect_elements(&self.node, &mut all);
        all.into_iter()
            .filter(|node| tag == "*" || local_name(node).is_some_and(|n| n.eq_ignore_ascii_case(tag)))
            .map(|node| MemoryElement {
                node,
                page: self.page.clone(),
            })
            .collect()
    }

    fn descendant_by_id(&self, id: &str) -> Option<Self> {
        self.descendants_by_tag("*")
            .into_iter()
            .find(|el| el.attribute("id").as_deref() == Some(id))
    }

    fn closest(&self, tag: &str, class: &str) -> Option<Self> {
        let mut current = parent_of(&self.node);
        while let Some(node) = current {
            let candidate = MemoryElement {
                node: node.clone(),
                page: self.page.clone(),
            };
            if local_name(&node).is_some_and(|n| tag == "*" || n.eq_ignore_ascii_case(tag))
                && (class.is_empty() || candidate.has_class(class))
            {
                return Some(candidate);
            }
            current = parent_of(&node);
        }
        None
    }

    fn detached_copy(&self) -> Option<Self> {
        Some(MemoryElement {
            node: deep_clone(&self.node),
            page: self.page.clone(),
        })
    }

    fn remove(&self) {
        if let Some(parent) = parent_of(&self.node) {
            parent
                .children
                .borrow_mut()
                .retain(|child| !Rc::ptr_eq(child, &self.node));
        }
        self.node.parent.set(None);
    }

    fn inner_html(&self) -> String {
        let mut out = Vec::new();
        let handle: SerializableHandle = self.node.clone().into();
        let opts = SerializeOpts {
            traversal_scope: TraversalScope::ChildrenOnly(None),
            ..Default::default()
        };
        if let Err(err) = serialize(&mut out, &handle, opts) {
            warn!("Failed to serialize element markup: {}", err);
            return String::new();
        }
        String::from_utf8_lossy(&out).into_owned()
    }

    fn add_listener(&self, kind: EventKind, listener: Listener) {
        self.with_page(|page| {
            page.listeners
                .borrow_mut()
                .entry(key(&self.node))
                .or_default()
                .push((kind, Rc::new(RefCell::new(listener))));
        });
    }
}
