use serde::{Deserialize, Serialize};

/// Kind of a survey question control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    /// Single line `<input>`.
    Text,
    /// Multi line `<textarea>`.
    TextArea,
    /// A group of checkable options sharing one question.
    MultiPick,
    /// A `<select>` chooser.
    Select,
}

/// `type` values of `<input>` that behave like a plain text box.
const TEXT_INPUT_TYPES: &[&str] = &["", "text", "search", "email", "url", "tel"];

impl FieldKind {
    /// Classifies a DOM element into a survey field kind.
    ///
    /// `tag` is the lowercase tag name, `input_type` the raw `type` attribute,
    /// `is_multi_pick_group` whether the element carries the multi-pick class
    /// and `inside_multi_pick` whether it lives inside such a group. Options of
    /// a multi-pick group belong to the group and are not fields of their own.
    pub fn classify(
        tag: &str,
        input_type: Option<&str>,
        is_multi_pick_group: bool,
        inside_multi_pick: bool,
    ) -> Option<Self> {
        if is_multi_pick_group {
            return Some(FieldKind::MultiPick);
        }
        if inside_multi_pick {
            return None;
        }
        match tag {
            "textarea" => Some(FieldKind::TextArea),
            "select" => Some(FieldKind::Select),
            "input" => {
                let ty = input_type.map(str::trim).unwrap_or_default();
                TEXT_INPUT_TYPES
                    .iter()
                    .any(|t| t.eq_ignore_ascii_case(ty))
                    .then_some(FieldKind::Text)
            }
            _ => None,
        }
    }

    /// Whether the control shows default text that should clear on first use.
    pub fn holds_default_text(&self) -> bool {
        matches!(self, FieldKind::Text | FieldKind::TextArea)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_text_like_inputs() {
        assert_eq!(FieldKind::classify("input", None, false, false), Some(FieldKind::Text));
        assert_eq!(FieldKind::classify("input", Some("TEXT"), false, false), Some(FieldKind::Text));
        assert_eq!(FieldKind::classify("input", Some("email"), false, false), Some(FieldKind::Text));
        assert_eq!(FieldKind::classify("input", Some("hidden"), false, false), None);
        assert_eq!(FieldKind::classify("input", Some("submit"), false, false), None);
        assert_eq!(FieldKind::classify("input", Some("checkbox"), false, false), None);
    }

    #[test]
    fn classifies_other_controls() {
        assert_eq!(FieldKind::classify("textarea", None, false, false), Some(FieldKind::TextArea));
        assert_eq!(FieldKind::classify("select", None, false, false), Some(FieldKind::Select));
        assert_eq!(FieldKind::classify("div", None, true, false), Some(FieldKind::MultiPick));
        assert_eq!(FieldKind::classify("div", None, false, false), None);
    }

    #[test]
    fn options_inside_a_group_are_not_fields() {
        assert_eq!(FieldKind::classify("input", Some("checkbox"), false, true), None);
        assert_eq!(FieldKind::classify("input", None, false, true), None);
    }

    #[test]
    fn only_text_controls_hold_defaults() {
        assert!(FieldKind::Text.holds_default_text());
        assert!(FieldKind::TextArea.holds_default_text());
        assert!(!FieldKind::Select.holds_default_text());
        assert!(!FieldKind::MultiPick.holds_default_text());
    }
}
