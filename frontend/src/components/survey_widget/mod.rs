//! Survey widget component: renders server provided survey markup and mounts
//! the controller on it.
//!
//! Responsibilities
//! - Insert the markup under a host `<div>` without re-rendering it later, so
//!   the behaviors attached by the controller survive.
//! - On first render, locate the widget inside the host and mount a
//!   `SurveyController` on it.
//! - Surface mount failures as a small status line.

use log::warn;
use survey_common::SurveyError;
use yew::prelude::*;

mod messages;
mod props;
mod state;

pub use messages::Msg;
pub use props::SurveyWidgetProps;
pub use state::SurveyWidget;

use crate::controller::SurveyController;
use crate::dom::web::{WebDocument, WebElement};
use crate::dom::SurveyElement;

impl Component for SurveyWidget {
    type Message = Msg;
    type Properties = SurveyWidgetProps;

    fn create(_ctx: &Context<Self>) -> Self {
        SurveyWidget::new()
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Mounted(report) => {
                self.report = Some(report);
                self.error = None;
            }
            Msg::MountFailed(error) => {
                warn!("Survey widget not mounted: {}", error);
                self.error = Some(error);
            }
        }
        true
    }

    fn changed(&mut self, _ctx: &Context<Self>, _old_props: &Self::Properties) -> bool {
        // The markup is owned by the controller once mounted.
        false
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let status = match (&self.error, &self.report) {
            (Some(error), _) => html! { <p class="survey-status error">{ error.clone() }</p> },
            (None, Some(report)) => html! {
                <p class="survey-status" hidden=true data-mode={report.mode.as_str()}>
                    { format!("{} fields ready", report.fields.augmented) }
                </p>
            },
            (None, None) => html! {},
        };

        html! {
            <>
                <div class="survey-host" ref={self.host_ref.clone()}>
                    { Html::from_html_unchecked(ctx.props().markup.clone()) }
                </div>
                { status }
            </>
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && !self.loaded {
            self.loaded = true;

            match self.mount(ctx) {
                Ok(controller) => {
                    let report = controller.mount();
                    self.controller = Some(controller);
                    ctx.link().send_message(Msg::Mounted(report));
                }
                Err(err) => ctx.link().send_message(Msg::MountFailed(err.to_string())),
            }
        }
    }
}

impl SurveyWidget {
    fn mount(&self, ctx: &Context<Self>) -> Result<SurveyController<WebDocument>, SurveyError> {
        let props = ctx.props();
        let host = self
            .host_ref
            .cast::<web_sys::Element>()
            .map(WebElement::new)
            .ok_or_else(|| SurveyError::missing("survey host element"))?;
        let document = WebDocument::current().ok_or_else(|| SurveyError::missing("document"))?;
        let widget = host
            .descendant_by_id(&props.config.widget_id)
            .ok_or_else(|| SurveyError::missing(format!("#{}", props.config.widget_id)))?;

        Ok(SurveyController::new(document, widget, props.mode, props.config.clone()))
    }
}
