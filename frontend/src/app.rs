use log::warn;
use survey_common::config::CONFIG_ATTRIBUTE;
use survey_common::model::mode::SurveyMode;
use survey_common::SurveyConfig;
use wasm_bindgen::JsCast;
use web_sys::HtmlTemplateElement;
use yew::{html, AttrValue, Component, Context, Html};

use crate::components::survey_widget::SurveyWidget;

/// Id of the `<template>` holding the server rendered survey page.
pub const SOURCE_TEMPLATE_ID: &str = "survey-source";

/// Markup, mode and configuration read from the source template.
struct SurveySource {
    markup: AttrValue,
    mode: Option<SurveyMode>,
    config: SurveyConfig,
}

fn read_source() -> Option<SurveySource> {
    let template = web_sys::window()?
        .document()?
        .get_element_by_id(SOURCE_TEMPLATE_ID)?
        .dyn_into::<HtmlTemplateElement>()
        .ok()?;

    let mode = template
        .get_attribute("data-mode")
        .and_then(|mode| match mode.parse::<SurveyMode>() {
            Ok(mode) => Some(mode),
            Err(err) => {
                warn!("{}", err);
                None
            }
        });
    let config = SurveyConfig::resolve(None, template.get_attribute(CONFIG_ATTRIBUTE).as_deref())
        .unwrap_or_else(|err| {
            warn!("{}; using defaults", err);
            SurveyConfig::default()
        });

    Some(SurveySource {
        markup: AttrValue::from(template.inner_html()),
        mode,
        config,
    })
}

pub struct App {
    source: Option<SurveySource>,
}

impl Component for App {
    type Message = ();
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            source: read_source(),
        }
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        match &self.source {
            Some(source) => html! {
                <SurveyWidget
                    markup={source.markup.clone()}
                    mode={source.mode}
                    config={source.config.clone()}
                />
            },
            None => html! {
                <p class="survey-status error">{ format!("No #{} template on this page", SOURCE_TEMPLATE_ID) }</p>
            },
        }
    }
}
