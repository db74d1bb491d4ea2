//! Submission handling: required selection checks on the submit controls and
//! the snapshot serializer on the form's submit event.

pub mod snapshot;
pub mod validator;

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;
use survey_common::model::submission::SubmissionFlow;
use survey_common::SurveyConfig;

use crate::dom::SurveyDocument;

/// What binding the submission handlers did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SubmissionBinding {
    pub controls: usize,
    pub serializer: bool,
}

impl SubmissionBinding {
    pub fn is_bound(&self) -> bool {
        self.controls > 0 || self.serializer
    }
}

/// Binds the validator and the serializer to `form`.
pub fn bind<D: SurveyDocument>(
    document: &D,
    form: &D::Element,
    widget: &D::Element,
    flow: &Rc<RefCell<SubmissionFlow>>,
    config: &Rc<SurveyConfig>,
    instance_id: &str,
) -> SubmissionBinding {
    SubmissionBinding {
        controls: validator::bind(document, form, flow, config, instance_id),
        serializer: snapshot::bind(document, form, widget, flow, config, instance_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::memory::{MemoryElement, MemoryPage};
    use crate::dom::{EventKind, SurveyElement};
    use survey_common::model::submission::SubmissionPhase;

    const PAGE: &str = r#"<html><body>
<form id="survey_form">
  <select id="id_project" name="project"><option value="None">--</option><option value="7">Bridge</option></select>
  <select id="id_grade" name="grade"><option value="None">--</option><option value="A">A</option></select>
  <div id="survey_widget" class="create">
    <p>Question</p>
    <div id="survey_options"><button type="button">Add</button></div>
  </div>
  <input type="hidden" id="id_s_html" name="s_html" value="">
  <input type="submit" id="go" value="Save">
</form>
</body></html>"#;

    struct Fixture {
        page: MemoryPage,
        flow: Rc<RefCell<SubmissionFlow>>,
    }

    impl Fixture {
        fn new() -> Self {
            let page = MemoryPage::parse(PAGE);
            let flow = Rc::new(RefCell::new(SubmissionFlow::new()));
            let config = Rc::new(SurveyConfig::default());
            let form = page.element_by_id("survey_form").unwrap();
            let widget = page.element_by_id("survey_widget").unwrap();
            let binding = bind(&page, &form, &widget, &flow, &config, "test");
            assert_eq!(binding.controls, 1);
            assert!(binding.serializer);
            Self { page, flow }
        }

        fn el(&self, id: &str) -> MemoryElement {
            self.page.element_by_id(id).unwrap()
        }

        fn phase(&self) -> SubmissionPhase {
            self.flow.borrow().phase()
        }
    }

    #[test]
    fn project_is_checked_first() {
        let fx = Fixture::new();
        fx.page.click(&fx.el("go"));

        assert_eq!(fx.page.alerts(), vec!["Please Choose a Project"]);
        assert!(fx.page.posts().is_empty());
        assert_eq!(fx.phase(), SubmissionPhase::Blocked);
        assert_eq!(fx.el("id_s_html").value(), "");
        assert!(fx.page.element_by_id("survey_options").is_some());
    }

    #[test]
    fn grade_blocks_after_project_is_chosen() {
        let fx = Fixture::new();
        fx.page.choose(&fx.el("id_project"), "7");
        fx.page.click(&fx.el("go"));

        assert_eq!(fx.page.alerts(), vec!["Please Choose a Grade"]);
        assert!(fx.page.posts().is_empty());
    }

    #[test]
    fn valid_submission_posts_snapshot_without_panel() {
        let fx = Fixture::new();
        fx.page.choose(&fx.el("id_project"), "7");
        fx.page.choose(&fx.el("id_grade"), "A");
        fx.page.click(&fx.el("go"));

        assert!(fx.page.alerts().is_empty());
        assert_eq!(fx.phase(), SubmissionPhase::Submitted);
        let posts = fx.page.posts();
        assert_eq!(posts.len(), 1);

        let snapshot = posts[0].value("s_html").unwrap();
        assert!(snapshot.contains("<p>Question</p>"));
        assert!(!snapshot.contains("survey_options"));
        assert!(fx.page.element_by_id("survey_options").is_none());
        assert_eq!(snapshot, fx.el("survey_widget").inner_html());
    }

    #[test]
    fn blocked_attempt_can_be_retried() {
        let fx = Fixture::new();
        fx.page.click(&fx.el("go"));
        assert_eq!(
            fx.flow.borrow().last_failure().map(|failure| failure.message()),
            Some("Please Choose a Project")
        );
        fx.page.choose(&fx.el("id_project"), "7");
        fx.page.choose(&fx.el("id_grade"), "A");
        fx.page.click(&fx.el("go"));

        assert_eq!(fx.page.alerts().len(), 1);
        assert_eq!(fx.page.posts().len(), 1);
        assert_eq!(fx.flow.borrow().attempts(), 2);
        assert_eq!(fx.flow.borrow().last_failure(), None);
    }

    #[test]
    fn clicks_after_submission_are_ignored() {
        let fx = Fixture::new();
        fx.page.choose(&fx.el("id_project"), "7");
        fx.page.choose(&fx.el("id_grade"), "A");
        fx.page.click(&fx.el("go"));
        fx.page.click(&fx.el("go"));

        assert_eq!(fx.page.posts().len(), 1);
    }

    #[test]
    fn submit_outside_an_attempt_leaves_snapshot_alone() {
        let fx = Fixture::new();
        let form = fx.el("survey_form");
        assert!(fx.page.dispatch(&form, EventKind::Submit));

        assert_eq!(fx.el("id_s_html").value(), "");
        assert!(fx.page.element_by_id("survey_options").is_some());
        assert_eq!(fx.phase(), SubmissionPhase::Idle);
    }

    #[test]
    fn capture_does_not_touch_the_page() {
        let page = MemoryPage::parse(PAGE);
        let widget = page.element_by_id("survey_widget").unwrap();
        let snapshot = snapshot::capture(&widget, &SurveyConfig::default()).unwrap();

        assert!(!snapshot.as_str().contains("survey_options"));
        assert!(page.element_by_id("survey_options").is_some());
    }

    #[test]
    fn binding_twice_is_a_no_op() {
        let fx = Fixture::new();
        let config = Rc::new(SurveyConfig::default());
        let again = bind(
            &fx.page,
            &fx.el("survey_form"),
            &fx.el("survey_widget"),
            &fx.flow,
            &config,
            "other",
        );
        assert!(!again.is_bound());
        assert_eq!(fx.page.listener_count(&fx.el("go"), EventKind::Click), 1);
        assert_eq!(fx.page.listener_count(&fx.el("survey_form"), EventKind::Submit), 1);
    }
}
