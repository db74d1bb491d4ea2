use serde::{Deserialize, Serialize};

/// The successful controls of a submitted form, in document order.
///
/// A multiple choice group posts one entry per checked option, all under the
/// group's name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FormPost {
    pub form_id: Option<String>,
    pub entries: Vec<(String, String)>,
}

impl FormPost {
    pub fn new(form_id: Option<String>) -> Self {
        Self {
            form_id,
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// First value posted under `name`.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Every value posted under `name`.
    pub fn values(&self, name: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }
}
