pub mod survey_widget;
