//! Full page flows of a survey taken on the in-memory host.

use survey_frontend::dom::memory::{MemoryElement, MemoryPage};
use survey_frontend::dom::{EventKind, SurveyDocument, SurveyElement};
use survey_frontend::{MountReport, SurveyConfig, SurveyController};
use survey_common::model::mode::SurveyMode;
use survey_common::model::submission::SubmissionPhase;

const TAKE_SURVEY: &str = r#"<!DOCTYPE html>
<html><body>
<form id="survey_form" method="post" action="/survey/take">
  <table>
    <tr>
      <td class="formfieldlabel">Project</td>
      <td><select id="id_project" name="project">
        <option value="None" selected>---------</option>
        <option value="p1">Distributed build cache</option>
      </select></td>
    </tr>
    <tr>
      <td class="formfieldlabel">Grade</td>
      <td><select id="id_grade" name="grade">
        <option value="None">---------</option>
        <option value="pass">Pass</option>
        <option value="fail">Fail</option>
      </select></td>
    </tr>
    <tr>
      <td class="formfieldlabel">Survey</td>
      <td class="formfieldvalue">
        <div id="survey_widget" class="create">
          <table>
            <tr><th>Name</th><td><input type="text" id="q_name" name="q_name" value="Your name here"></td></tr>
            <tr><th>Story</th><td><textarea id="q_story" name="q_story" rows="2">Write about it</textarea></td></tr>
            <tr><th>Tools</th><td><div class="pick_multi" id="q_tools">
              <input type="checkbox" name="q_tools" value="git" checked>
              <input type="checkbox" name="q_tools" value="svn">
            </div></td></tr>
          </table>
          <div id="survey_options">
            <button type="button" id="add_question">Add question</button>
          </div>
        </div>
      </td>
    </tr>
  </table>
  <input type="hidden" id="id_s_html" name="s_html" value="">
  <input type="submit" id="submit_survey" value="Submit">
</form>
</body></html>"#;

fn init_logs() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}

/// Live markup without the augmented markers of controller `instance_id`.
fn unmarked(markup: &str, instance_id: &str) -> String {
    markup.replace(&format!(r#" data-survey-augmented="{}""#, instance_id), "")
}

struct SurveyPage {
    page: MemoryPage,
    controller: SurveyController<MemoryPage>,
    report: MountReport,
}

impl SurveyPage {
    fn mount(html: &str, mode: Option<SurveyMode>) -> Self {
        init_logs();
        let config = SurveyConfig::default();
        let page = MemoryPage::parse_with_config(html, &config);
        let controller = SurveyController::locate(page.clone(), mode, config).unwrap();
        let report = controller.mount();
        Self {
            page,
            controller,
            report,
        }
    }

    fn el(&self, id: &str) -> MemoryElement {
        self.page.element_by_id(id).unwrap()
    }

    fn choose_project_and_grade(&self) {
        self.page.choose(&self.el("id_project"), "p1");
        self.page.choose(&self.el("id_grade"), "pass");
    }

    fn submit(&self) {
        self.page.click(&self.el("submit_survey"));
    }
}

#[test]
fn first_edit_replaces_default_text() {
    let survey = SurveyPage::mount(TAKE_SURVEY, None);
    let name = survey.el("q_name");

    survey.page.type_text(&name, "Ada");
    assert_eq!(name.value(), "Ada");

    survey.page.blur();
    survey.page.type_text(&name, " Lovelace");
    assert_eq!(name.value(), "Ada Lovelace");
}

#[test]
fn edited_value_is_not_cleared_on_first_focus() {
    let survey = SurveyPage::mount(TAKE_SURVEY, None);
    let name = survey.el("q_name");

    name.set_value("Grace");
    survey.page.type_text(&name, "!");
    assert_eq!(name.value(), "Grace!");
}

#[test]
fn textarea_grows_and_keeps_its_initial_height() {
    let survey = SurveyPage::mount(TAKE_SURVEY, None);
    let story = survey.el("q_story");
    assert_eq!(story.height_px(), Some(32));
    assert_eq!(story.style("overflow").as_deref(), Some("auto"));

    survey.page.type_text(&story, "one\ntwo\nthree\nfour\nfive");
    assert_eq!(story.value(), "one\ntwo\nthree\nfour\nfive");
    assert_eq!(story.height_px(), Some(80));

    survey.page.choose(&story, "short");
    assert_eq!(story.height_px(), Some(32));
}

#[test]
fn saved_results_keep_answers_and_still_grow() {
    let html = TAKE_SURVEY.replace(r#"class="create""#, r#"class="saved""#);
    let survey = SurveyPage::mount(&html, None);
    assert_eq!(survey.report.mode, SurveyMode::ViewSavedResult);
    assert_eq!(survey.report.fields.multi_pick_options, 2);

    let name = survey.el("q_name");
    survey.page.type_text(&name, "!");
    assert_eq!(name.value(), "Your name here!");

    let story = survey.el("q_story");
    survey.page.set_content_height(&story, 120);
    survey.page.type_text(&story, "x");
    assert_eq!(story.height_px(), Some(120));

    let checked: Vec<bool> = survey
        .el("q_tools")
        .descendants_by_tag("input")
        .iter()
        .map(|option| option.attribute("checked").is_some())
        .collect();
    assert_eq!(checked, vec![true, false]);
}

#[test]
fn missing_project_blocks_submission() {
    let survey = SurveyPage::mount(TAKE_SURVEY, None);
    survey.page.choose(&survey.el("id_grade"), "pass");
    survey.submit();

    assert_eq!(survey.page.alerts(), vec!["Please Choose a Project"]);
    assert!(survey.page.posts().is_empty());
    assert_eq!(survey.el("id_s_html").value(), "");
    assert!(survey.page.element_by_id("survey_options").is_some());
    assert_eq!(survey.controller.phase(), SubmissionPhase::Blocked);
}

#[test]
fn missing_grade_blocks_submission() {
    let survey = SurveyPage::mount(TAKE_SURVEY, None);
    survey.page.choose(&survey.el("id_project"), "p1");
    survey.submit();

    assert_eq!(survey.page.alerts(), vec!["Please Choose a Grade"]);
    assert!(survey.page.posts().is_empty());
}

#[test]
fn valid_submission_posts_widget_markup() {
    let survey = SurveyPage::mount(TAKE_SURVEY, None);
    survey.page.type_text(&survey.el("q_name"), "Ada");
    survey.choose_project_and_grade();
    survey.submit();

    assert!(survey.page.alerts().is_empty());
    assert_eq!(survey.controller.phase(), SubmissionPhase::Submitted);
    assert!(survey.page.element_by_id("survey_options").is_none());

    let posts = survey.page.posts();
    assert_eq!(posts.len(), 1);
    let post = &posts[0];
    assert_eq!(post.form_id.as_deref(), Some("survey_form"));
    assert_eq!(post.value("project"), Some("p1"));
    assert_eq!(post.value("grade"), Some("pass"));
    assert_eq!(post.value("q_name"), Some("Ada"));
    assert_eq!(post.values("q_tools"), vec!["git"]);

    let snapshot = post.value("s_html").unwrap();
    assert_eq!(snapshot, survey.el("id_s_html").value());
    let live = survey.el("survey_widget").inner_html();
    assert_eq!(snapshot, unmarked(&live, survey.controller.instance_id()));
    assert!(!snapshot.contains("data-survey-augmented"));
    assert!(snapshot.contains(r#"id="q_story""#));
    assert!(!snapshot.contains("add_question"));
}

#[test]
fn identical_submissions_post_identical_snapshots() {
    let submit_once = || {
        let survey = SurveyPage::mount(TAKE_SURVEY, None);
        survey.choose_project_and_grade();
        survey.submit();
        survey.page.posts()[0].value("s_html").unwrap().to_string()
    };

    let first = submit_once();
    let second = submit_once();
    assert_eq!(first, second);
    assert!(!first.contains("data-survey-augmented"));
}

#[test]
fn oversized_textarea_mounts() {
    let html = TAKE_SURVEY.replace(r#"rows="2""#, r#"rows="300000000""#);
    let survey = SurveyPage::mount(&html, None);
    assert_eq!(survey.report.fields.growfields, 1);
    assert_eq!(survey.el("q_story").height_px(), Some(u32::MAX));
}

#[test]
fn retry_after_block_submits_once() {
    let survey = SurveyPage::mount(TAKE_SURVEY, None);
    survey.submit();
    survey.choose_project_and_grade();
    survey.submit();
    survey.submit();

    assert_eq!(survey.page.alerts(), vec!["Please Choose a Project"]);
    assert_eq!(survey.page.posts().len(), 1);
}

#[test]
fn mounting_twice_binds_once() {
    let survey = SurveyPage::mount(TAKE_SURVEY, None);
    let second = SurveyController::locate(survey.page.clone(), None, SurveyConfig::default())
        .unwrap()
        .mount();

    assert_eq!(second.fields.augmented, 0);
    assert_eq!(second.fields.already_augmented, survey.report.fields.augmented);
    assert!(!second.submission.is_bound());

    let name = survey.el("q_name");
    assert_eq!(survey.page.listener_count(&name, EventKind::Focus), 1);
    assert_eq!(
        survey.page.listener_count(&survey.el("submit_survey"), EventKind::Click),
        1
    );
    assert_eq!(
        name.attribute("data-survey-augmented").as_deref(),
        Some(survey.controller.instance_id())
    );

    survey.submit();
    assert_eq!(survey.page.alerts().len(), 1);
}

#[test]
fn missing_snapshot_field_still_posts() {
    let html = TAKE_SURVEY.replace(
        r#"<input type="hidden" id="id_s_html" name="s_html" value="">"#,
        "",
    );
    let survey = SurveyPage::mount(&html, None);
    survey.choose_project_and_grade();
    survey.submit();

    let posts = survey.page.posts();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].value("s_html"), None);
    assert!(survey.page.element_by_id("survey_options").is_none());
}

#[test]
fn page_without_choosers_submits_directly() {
    let html = TAKE_SURVEY
        .replace(r#"id="id_project""#, r#"id="other_project""#)
        .replace(r#"id="id_grade""#, r#"id="other_grade""#);
    let survey = SurveyPage::mount(&html, None);
    survey.submit();

    assert!(survey.page.alerts().is_empty());
    assert_eq!(survey.page.posts().len(), 1);
}

#[test]
fn configuration_renames_dom_targets() {
    init_logs();
    let html = TAKE_SURVEY
        .replace(r#"id="survey_widget""#, r#"id="feedback""#)
        .replace(r#"id="id_s_html""#, r#"id="snapshot""#);
    let config = SurveyConfig::from_json(r#"{"widget_id": "feedback", "snapshot_field_id": "snapshot"}"#).unwrap();
    assert_eq!(config.options_panel_id, "survey_options");

    let page = MemoryPage::parse(&html);
    let controller = SurveyController::locate(page.clone(), Some(SurveyMode::Create), config).unwrap();
    controller.mount();

    page.choose(&page.element_by_id("id_project").unwrap(), "p1");
    page.choose(&page.element_by_id("id_grade").unwrap(), "pass");
    page.click(&page.element_by_id("submit_survey").unwrap());

    let posts = page.posts();
    assert_eq!(posts.len(), 1);
    let snapshot = posts[0].value("s_html").unwrap();
    let live = page.element_by_id("feedback").unwrap().inner_html();
    assert_eq!(snapshot, unmarked(&live, controller.instance_id()));
}
