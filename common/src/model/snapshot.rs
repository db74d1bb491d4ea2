use serde::{Deserialize, Serialize};

/// Markup of the survey widget captured at submission time.
///
/// The string is the widget's inner HTML with the options panel and the
/// augmented markers left out. It is posted verbatim in the hidden snapshot
/// field; the server side parser owns its interpretation, so nothing here
/// reformats it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot(String);

impl Snapshot {
    pub fn new(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
